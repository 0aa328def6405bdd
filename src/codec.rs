//! Canonical encoding of keys and proof values as Baby Bear elements.
//!
//! Integers and booleans take one element each, commitments take
//! `COMMITMENT_NUM_FIELDS` limbs, and fixed-size arrays concatenate their
//! entries. Integers must be below the field modulus.

use p3_field::{FieldAlgebra, PrimeField32};

use crate::commitment::{Commitment, COMMITMENT_NUM_FIELDS};
use crate::error::{FlavorError, Result};
use crate::univariate::Univariate;
use crate::{BABY_BEAR_PRIME, F};

/// A value with a fixed-length field-element encoding
pub trait FieldCodec: Sized {
    /// Number of elements written by `write_fields`
    const NUM_FIELDS: usize;

    fn write_fields(&self, out: &mut Vec<F>);

    /// Decode from exactly `NUM_FIELDS` elements
    fn read_fields(fields: &[F]) -> Result<Self>;
}

/// Fails unless `fields` holds exactly one encoded `T`
pub fn check_field_count<T: FieldCodec>(fields: &[F]) -> Result<()> {
    if fields.len() < T::NUM_FIELDS {
        return Err(FlavorError::BufferExhausted {
            needed: T::NUM_FIELDS,
            offset: 0,
            available: fields.len(),
        });
    }
    if fields.len() > T::NUM_FIELDS {
        return Err(FlavorError::TrailingElements {
            consumed: T::NUM_FIELDS,
            total: fields.len(),
        });
    }
    Ok(())
}

impl FieldCodec for F {
    const NUM_FIELDS: usize = 1;

    fn write_fields(&self, out: &mut Vec<F>) {
        out.push(*self);
    }

    fn read_fields(fields: &[F]) -> Result<Self> {
        check_field_count::<Self>(fields)?;
        Ok(fields[0])
    }
}

impl FieldCodec for u32 {
    const NUM_FIELDS: usize = 1;

    fn write_fields(&self, out: &mut Vec<F>) {
        assert!(
            *self < BABY_BEAR_PRIME,
            "integer {self} does not fit in one field element"
        );
        out.push(F::from_canonical_u32(*self));
    }

    fn read_fields(fields: &[F]) -> Result<Self> {
        check_field_count::<Self>(fields)?;
        Ok(fields[0].as_canonical_u32())
    }
}

impl FieldCodec for usize {
    const NUM_FIELDS: usize = 1;

    fn write_fields(&self, out: &mut Vec<F>) {
        let value = u32::try_from(*self)
            .unwrap_or_else(|_| panic!("integer {self} does not fit in one field element"));
        value.write_fields(out);
    }

    fn read_fields(fields: &[F]) -> Result<Self> {
        Ok(u32::read_fields(fields)? as usize)
    }
}

impl FieldCodec for bool {
    const NUM_FIELDS: usize = 1;

    fn write_fields(&self, out: &mut Vec<F>) {
        out.push(if *self { F::ONE } else { F::ZERO });
    }

    fn read_fields(fields: &[F]) -> Result<Self> {
        check_field_count::<Self>(fields)?;
        match fields[0].as_canonical_u32() {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(FlavorError::InvalidBool(other)),
        }
    }
}

impl FieldCodec for Commitment {
    const NUM_FIELDS: usize = COMMITMENT_NUM_FIELDS;

    fn write_fields(&self, out: &mut Vec<F>) {
        out.extend_from_slice(&self.to_field_limbs());
    }

    fn read_fields(fields: &[F]) -> Result<Self> {
        check_field_count::<Self>(fields)?;
        Commitment::from_field_limbs(fields)
    }
}

impl<const LENGTH: usize> FieldCodec for Univariate<F, LENGTH> {
    const NUM_FIELDS: usize = LENGTH;

    fn write_fields(&self, out: &mut Vec<F>) {
        out.extend_from_slice(self.evaluations());
    }

    fn read_fields(fields: &[F]) -> Result<Self> {
        check_field_count::<Self>(fields)?;
        let mut evaluations = [F::ZERO; LENGTH];
        evaluations.copy_from_slice(fields);
        Ok(Univariate::new(evaluations))
    }
}

impl<T, const N: usize> FieldCodec for [T; N]
where
    T: FieldCodec + Copy + Default,
{
    const NUM_FIELDS: usize = N * T::NUM_FIELDS;

    fn write_fields(&self, out: &mut Vec<F>) {
        for item in self {
            item.write_fields(out);
        }
    }

    fn read_fields(fields: &[F]) -> Result<Self> {
        check_field_count::<Self>(fields)?;
        let mut items = [T::default(); N];
        for (item, chunk) in items.iter_mut().zip(fields.chunks_exact(T::NUM_FIELDS)) {
            *item = T::read_fields(chunk)?;
        }
        Ok(items)
    }
}

/// Append the encoding of `value` to `buffer`
pub fn serialize_to_buffer<T: FieldCodec>(value: &T, buffer: &mut Vec<F>) {
    value.write_fields(buffer);
}

/// Decode a `T` at `*offset` and advance the offset past it
pub fn deserialize_from_buffer<T: FieldCodec>(buffer: &[F], offset: &mut usize) -> Result<T> {
    let end = *offset + T::NUM_FIELDS;
    if end > buffer.len() {
        return Err(FlavorError::BufferExhausted {
            needed: T::NUM_FIELDS,
            offset: *offset,
            available: buffer.len(),
        });
    }
    let value = T::read_fields(&buffer[*offset..end])?;
    *offset = end;
    Ok(value)
}

/// Sequential reader over an encoded buffer
#[derive(Clone, Debug)]
pub struct FieldReader<'a> {
    buffer: &'a [F],
    offset: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(buffer: &'a [F]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn read<T: FieldCodec>(&mut self) -> Result<T> {
        deserialize_from_buffer(self.buffer, &mut self.offset)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// Fails when elements are left unread
    pub fn finish(self) -> Result<()> {
        if self.offset != self.buffer.len() {
            return Err(FlavorError::TrailingElements {
                consumed: self.offset,
                total: self.buffer.len(),
            });
        }
        Ok(())
    }
}
