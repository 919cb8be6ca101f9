//! Single-attribute scan predicates.

use crate::errors::{HeapError, HeapResult};
use binary_helpers::le::read_le;
use std::cmp::Ordering;

/// How the compared bytes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datatype {
    /// Raw bytes, compared lexicographically.
    String,
    /// Little-endian `i32`.
    Integer,
    /// Little-endian `f32`.
    Float,
}

impl Datatype {
    /// Width the attribute must have, `None` for variable-width strings.
    pub fn fixed_len(self) -> Option<usize> {
        match self {
            Datatype::String => None,
            Datatype::Integer => Some(size_of::<i32>()),
            Datatype::Float => Some(size_of::<f32>()),
        }
    }
}

/// Comparison applied as `record_value <op> literal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Lt,
    Lte,
    Eq,
    Gte,
    Gt,
    Ne,
}

impl Operator {
    /// Applies the operator to the signed difference `record_value - literal`.
    /// Zero is exact, so equality on floats has no tolerance.
    fn holds(self, diff: f64) -> bool {
        match self {
            Operator::Lt => diff < 0.0,
            Operator::Lte => diff <= 0.0,
            Operator::Eq => diff == 0.0,
            Operator::Gte => diff >= 0.0,
            Operator::Gt => diff > 0.0,
            Operator::Ne => diff != 0.0,
        }
    }
}

/// Filter on the `length` bytes found at `offset` in each record.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPredicate {
    offset: usize,
    length: usize,
    datatype: Datatype,
    op: Operator,
    value: Vec<u8>,
}

impl ScanPredicate {
    /// Validates the scan parameters and copies the first `length` bytes of `value`.
    ///
    /// # Errors
    /// `BadScanParm` if `length` is zero, does not match the width of a fixed-width datatype,
    /// or exceeds the literal.
    pub fn new(
        offset: usize,
        length: usize,
        datatype: Datatype,
        value: &[u8],
        op: Operator,
    ) -> HeapResult<Self> {
        if length == 0 {
            return Err(HeapError::BadScanParm("length must be at least 1"));
        }
        if datatype.fixed_len().is_some_and(|fixed| fixed != length) {
            return Err(HeapError::BadScanParm(
                "length does not match the width of the datatype",
            ));
        }
        let value = value
            .get(..length)
            .ok_or(HeapError::BadScanParm("filter value is shorter than length"))?;

        Ok(Self {
            offset,
            length,
            datatype,
            op,
            value: value.to_vec(),
        })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn datatype(&self) -> Datatype {
        self.datatype
    }

    pub fn op(&self) -> Operator {
        self.op
    }

    /// Whether `record` satisfies the predicate. Records too short to contain the attribute
    /// never match.
    pub fn matches(&self, record: &[u8]) -> bool {
        let Some(attr) = self
            .offset
            .checked_add(self.length)
            .and_then(|end| record.get(self.offset..end))
        else {
            return false;
        };

        match self.difference(attr) {
            Some(diff) => self.op.holds(diff),
            None => false,
        }
    }

    /// `attr - value` as a signed number. Strings map their ordering to -1, 0 or 1.
    fn difference(&self, attr: &[u8]) -> Option<f64> {
        match self.datatype {
            Datatype::Integer => {
                let a = read_le::<i32>(attr, 0).ok()?;
                let b = read_le::<i32>(&self.value, 0).ok()?;
                // Widened so extreme values cannot overflow.
                Some((i64::from(a) - i64::from(b)) as f64)
            }
            Datatype::Float => {
                let a = read_le::<f32>(attr, 0).ok()?;
                let b = read_le::<f32>(&self.value, 0).ok()?;
                Some(f64::from(a - b))
            }
            Datatype::String => Some(match attr.cmp(self.value.as_slice()) {
                Ordering::Less => -1.0,
                Ordering::Equal => 0.0,
                Ordering::Greater => 1.0,
            }),
        }
    }
}
