//! Best-effort codec for optional scalar and fixed-size array fields.
//!
//! Reads are presence-tracking: a missing link, a wrong type class, or a
//! wrong element count all report the field as absent (`Ok(None)`) so that
//! files written by newer or older schema revisions stay readable. Only
//! engine-level failures after a link was found surface as errors.
//!
//! Numeric fields go through `f64` on disk and in memory regardless of any
//! narrower in-memory width, giving a single stable numeric contract.
//! Strings are stored as variable-length UTF-8 scalars.

use std::str::FromStr;

use hdf5::types::{TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::Group;
use ndarray::{ArrayViewD, IxDyn};

use crate::error::{Error, Result};

fn is_scalar(ds: &hdf5::Dataset) -> bool {
    ds.shape().is_empty()
}

/// Reads an optional string field stored as a scalar string dataset.
pub fn read_string(group: &Group, name: &str) -> Result<Option<String>> {
    if !group.link_exists(name) {
        return Ok(None);
    }
    let ds = group.dataset(name)?;
    if !is_scalar(&ds) {
        return Ok(None);
    }
    match ds.dtype()?.to_descriptor()? {
        TypeDescriptor::VarLenUnicode | TypeDescriptor::FixedUnicode(_) => {
            Ok(ds.read_scalar::<VarLenUnicode>().ok().map(|v| v.to_string()))
        }
        TypeDescriptor::VarLenAscii | TypeDescriptor::FixedAscii(_) => {
            Ok(ds.read_scalar::<VarLenAscii>().ok().map(|v| v.to_string()))
        }
        _ => Ok(None),
    }
}

/// Writes a string field as a scalar variable-length UTF-8 dataset.
pub fn write_string(group: &Group, name: &str, value: &str) -> Result<()> {
    let value =
        VarLenUnicode::from_str(value).map_err(|e| Error::InvalidString(e.to_string()))?;
    group
        .new_dataset::<VarLenUnicode>()
        .create(name)?
        .write_scalar(&value)?;
    Ok(())
}

/// Reads an optional float field stored as a scalar float dataset.
pub fn read_f64(group: &Group, name: &str) -> Result<Option<f64>> {
    if !group.link_exists(name) {
        return Ok(None);
    }
    let ds = group.dataset(name)?;
    if !is_scalar(&ds) {
        return Ok(None);
    }
    match ds.dtype()?.to_descriptor()? {
        TypeDescriptor::Float(_) => Ok(Some(ds.read_scalar::<f64>()?)),
        _ => Ok(None),
    }
}

/// Writes a float field as a scalar double-precision dataset.
pub fn write_f64(group: &Group, name: &str, value: f64) -> Result<()> {
    group.new_dataset::<f64>().create(name)?.write_scalar(&value)?;
    Ok(())
}

/// Reads an optional integer field stored as a scalar integer dataset.
pub fn read_i32(group: &Group, name: &str) -> Result<Option<i32>> {
    if !group.link_exists(name) {
        return Ok(None);
    }
    let ds = group.dataset(name)?;
    if !is_scalar(&ds) {
        return Ok(None);
    }
    match ds.dtype()?.to_descriptor()? {
        TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) => {
            Ok(Some(ds.read_scalar::<i32>()?))
        }
        _ => Ok(None),
    }
}

/// Writes an integer field as a scalar native dataset.
pub fn write_i32(group: &Group, name: &str, value: i32) -> Result<()> {
    group.new_dataset::<i32>().create(name)?.write_scalar(&value)?;
    Ok(())
}

/// Reads an optional fixed-size float array field.
///
/// The stored dataset must be float-class with exactly `len` elements in
/// total; its dimensionality beyond that is not inspected (a `[6]` and a
/// `[2, 3]` layout are interchangeable).
pub fn read_f64_array(group: &Group, name: &str, len: usize) -> Result<Option<Vec<f64>>> {
    if !group.link_exists(name) {
        return Ok(None);
    }
    let ds = group.dataset(name)?;
    let shape = ds.shape();
    if shape.is_empty() || shape.iter().product::<usize>() != len {
        return Ok(None);
    }
    match ds.dtype()?.to_descriptor()? {
        TypeDescriptor::Float(_) => Ok(Some(ds.read_raw::<f64>()?)),
        _ => Ok(None),
    }
}

/// Writes a fixed-shape float array field as double precision.
pub fn write_f64_array(group: &Group, name: &str, values: &[f64], dims: &[usize]) -> Result<()> {
    let expected = dims.iter().product::<usize>();
    if dims.is_empty() || values.len() != expected {
        return Err(Error::BufferSize {
            expected,
            actual: values.len(),
        });
    }
    let ds = group.new_dataset::<f64>().shape(dims.to_vec()).create(name)?;
    ds.write(ArrayViewD::from_shape(IxDyn(dims), values)?)?;
    Ok(())
}

/// Reads an optional 3-vector float field.
pub fn read_f64_vec3(group: &Group, name: &str) -> Result<Option<[f64; 3]>> {
    Ok(read_f64_array(group, name, 3)?.map(|v| [v[0], v[1], v[2]]))
}

/// Writes a 3-vector float field with shape `[3]`.
pub fn write_f64_vec3(group: &Group, name: &str, value: &[f64; 3]) -> Result<()> {
    write_f64_array(group, name, value, &[3])
}

/// Reads an optional 2×3 float matrix field (6 elements in any layout).
pub fn read_f64_mat2x3(group: &Group, name: &str) -> Result<Option<[[f64; 3]; 2]>> {
    Ok(read_f64_array(group, name, 6)?
        .map(|v| [[v[0], v[1], v[2]], [v[3], v[4], v[5]]]))
}

/// Writes a 2×3 float matrix field with shape `[2, 3]`.
pub fn write_f64_mat2x3(group: &Group, name: &str, value: &[[f64; 3]; 2]) -> Result<()> {
    let flat = [
        value[0][0], value[0][1], value[0][2], value[1][0], value[1][1], value[1][2],
    ];
    write_f64_array(group, name, &flat, &[2, 3])
}
