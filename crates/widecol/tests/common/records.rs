//! Record types shared by the integration tests.

use std::sync::OnceLock;

use widecol::{Record, RecordDescriptor, TypeClass};

/// Sparse, one component: `cf=users key=Id cols=Kind`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub age: i64,
}

impl Record for User {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: OnceLock<RecordDescriptor<User>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            RecordDescriptor::<User>::builder("User")
                .tag("cf", "users")
                .tag("key", "Id")
                .tag("cols", "Kind")
                .tag("mapping", "sparse")
                .field("Id", TypeClass::Utf8, |u| u.id.clone().into(), |u, v| {
                    u.id = v.try_into()?;
                    Ok(())
                })
                .field("Kind", TypeClass::Utf8, |u| u.kind.clone().into(), |u, v| {
                    u.kind = v.try_into()?;
                    Ok(())
                })
                .field("Name", TypeClass::Utf8, |u| u.name.clone().into(), |u, v| {
                    u.name = v.try_into()?;
                    Ok(())
                })
                .field("Age", TypeClass::Long, |u| u.age.into(), |u, v| {
                    u.age = v.try_into()?;
                    Ok(())
                })
                .build()
                .expect("User descriptor")
        })
    }
}

pub fn user(id: &str, kind: &str, name: &str, age: i64) -> User {
    User {
        id: id.into(),
        kind: kind.into(),
        name: name.into(),
        age,
    }
}

/// Sparse, no components, one field stored under another name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub active: bool,
}

impl Record for Account {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: OnceLock<RecordDescriptor<Account>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            RecordDescriptor::<Account>::builder("Account")
                .tag("cf", "accounts")
                .tag("key", "Id")
                .field("Id", TypeClass::Ascii, |a| a.id.clone().into(), |a, v| {
                    a.id = v.try_into()?;
                    Ok(())
                })
                .field_as(
                    "Email",
                    "mail",
                    TypeClass::Utf8,
                    |a| a.email.clone().into(),
                    |a, v| {
                        a.email = v.try_into()?;
                        Ok(())
                    },
                )
                .field("Active", TypeClass::Boolean, |a| a.active.into(), |a, v| {
                    a.active = v.try_into()?;
                    Ok(())
                })
                .build()
                .expect("Account descriptor")
        })
    }
}

/// Compact, two components: `cf=events key=Stream cols=At,Seq value=Payload`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    pub stream: String,
    pub at: i64,
    pub seq: i32,
    pub payload: Vec<u8>,
    pub source: String,
}

impl Record for Event {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: OnceLock<RecordDescriptor<Event>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            RecordDescriptor::<Event>::builder("Event")
                .tag("cf", "events")
                .tag("key", "Stream")
                .tag("cols", "At,Seq")
                .tag("value", "Payload")
                .tag("mapping", "compact")
                .field("Stream", TypeClass::Utf8, |e| e.stream.clone().into(), |e, v| {
                    e.stream = v.try_into()?;
                    Ok(())
                })
                .field("At", TypeClass::Date, |e| e.at.into(), |e, v| {
                    e.at = v.try_into()?;
                    Ok(())
                })
                .field("Seq", TypeClass::Int32, |e| e.seq.into(), |e, v| {
                    e.seq = v.try_into()?;
                    Ok(())
                })
                .field("Payload", TypeClass::Bytes, |e| e.payload.clone().into(), |e, v| {
                    e.payload = v.try_into()?;
                    Ok(())
                })
                .field("Source", TypeClass::Utf8, |e| e.source.clone().into(), |e, v| {
                    e.source = v.try_into()?;
                    Ok(())
                })
                .build()
                .expect("Event descriptor")
        })
    }
}

pub fn event(stream: &str, at: i64, seq: i32, payload: &[u8]) -> Event {
    Event {
        stream: stream.into(),
        at,
        seq,
        payload: payload.to_vec(),
        source: String::new(),
    }
}
