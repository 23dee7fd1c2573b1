//! Composite column-name codec.
//!
//! A composite name is a run of components, each laid out as a 2-byte
//! big-endian length, the raw component bytes, and a 1-byte end-of-component
//! marker. A packed name therefore takes `sum(len(c) + 3)` bytes, and zero
//! components pack to the empty name used by non-composite keys.

use widecol_buffers::{Reader, Writer};

use crate::error::CompositeError;

/// End-of-component marker.
///
/// Stored names always carry [`Eoc::Equals`]. Range queries put
/// [`Eoc::LessThan`] or [`Eoc::GreaterThan`] on the last component of a slice
/// bound to include or exclude everything sharing that prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Eoc {
    LessThan = 0xff,
    Equals = 0x00,
    GreaterThan = 0x01,
}

/// Bytes of framing around each component.
pub const COMPONENT_OVERHEAD: usize = 3;

/// Size of the packed form of `components`.
pub fn packed_len<C: AsRef<[u8]>>(components: &[C]) -> usize {
    components
        .iter()
        .map(|c| c.as_ref().len() + COMPONENT_OVERHEAD)
        .sum()
}

fn write_component(w: &mut Writer, component: &[u8], eoc: Eoc) -> Result<(), CompositeError> {
    let len = u16::try_from(component.len())
        .map_err(|_| CompositeError::ComponentTooLong { len: component.len() })?;
    w.u16(len);
    w.buf(component);
    w.u8(eoc as u8);
    Ok(())
}

/// Packs `components` into a composite name.
///
/// # Example
///
/// ```
/// use widecol::composite::{pack, unpack};
///
/// let name = pack(&[&b"profile"[..], b"Name"]).unwrap();
/// assert_eq!(&name[..3], &[0x00, 0x07, b'p']);
/// assert_eq!(unpack(&name).unwrap(), vec![b"profile".to_vec(), b"Name".to_vec()]);
/// ```
pub fn pack<C: AsRef<[u8]>>(components: &[C]) -> Result<Vec<u8>, CompositeError> {
    pack_with_eoc(components, Eoc::Equals)
}

/// Packs `components`, putting `last` as the marker of the final component.
pub fn pack_with_eoc<C: AsRef<[u8]>>(
    components: &[C],
    last: Eoc,
) -> Result<Vec<u8>, CompositeError> {
    let mut w = Writer::with_capacity(packed_len(components));
    let n = components.len();
    for (i, c) in components.iter().enumerate() {
        let eoc = if i + 1 == n { last } else { Eoc::Equals };
        write_component(&mut w, c.as_ref(), eoc)?;
    }
    Ok(w.flush())
}

/// Appends one more `Equals`-terminated component to an already packed name.
pub fn push_component(name: &mut Vec<u8>, component: &[u8]) -> Result<(), CompositeError> {
    let mut w = Writer::with_capacity(component.len() + COMPONENT_OVERHEAD);
    write_component(&mut w, component, Eoc::Equals)?;
    name.extend_from_slice(&w.flush());
    Ok(())
}

/// Splits a composite name back into its components. End-of-component markers
/// are read but not interpreted.
pub fn unpack(name: &[u8]) -> Result<Vec<Vec<u8>>, CompositeError> {
    let mut reader = Reader::new(name);
    let mut components = Vec::new();
    while !reader.is_empty() {
        let offset = reader.position();
        let truncated = |source| CompositeError::Truncated { offset, source };
        let len = reader.u16().map_err(truncated)? as usize;
        let component = reader.buf(len).map_err(truncated)?;
        reader.u8().map_err(truncated)?;
        components.push(component.to_vec());
    }
    Ok(components)
}
