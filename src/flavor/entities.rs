//! The union container over all 63 columns and the column catalogue.

use serde::{Deserialize, Serialize};

use super::columns::{
    entity_subsets, PrecomputedColumn, PrecomputedEntities, ShiftedColumn, ShiftedEntities,
    WitnessColumn, WitnessEntities,
};
use super::{NUM_ALL_ENTITIES, NUM_FOLDED_ENTITIES, NUM_PRECOMPUTED_ENTITIES};

/// Storage category of a column
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnCategory {
    Precomputed,
    Witness,
    Shifted,
}

/// Any column of the flavor, addressed by category and position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Precomputed(PrecomputedColumn),
    Witness(WitnessColumn),
    Shifted(ShiftedColumn),
}

/// One entry of the ordered column catalogue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub index: usize,
    pub name: &'static str,
    pub label: &'static str,
    pub category: ColumnCategory,
}

impl Column {
    pub const COUNT: usize = NUM_ALL_ENTITIES;

    /// Position within `AllEntities`
    pub const fn index(self) -> usize {
        match self {
            Column::Precomputed(c) => c.index(),
            Column::Witness(c) => NUM_PRECOMPUTED_ENTITIES + c.index(),
            Column::Shifted(c) => NUM_FOLDED_ENTITIES + c.index(),
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index < NUM_PRECOMPUTED_ENTITIES {
            PrecomputedColumn::from_index(index).map(Column::Precomputed)
        } else if index < NUM_FOLDED_ENTITIES {
            WitnessColumn::from_index(index - NUM_PRECOMPUTED_ENTITIES).map(Column::Witness)
        } else {
            ShiftedColumn::from_index(index - NUM_FOLDED_ENTITIES).map(Column::Shifted)
        }
    }

    pub const fn category(self) -> ColumnCategory {
        match self {
            Column::Precomputed(_) => ColumnCategory::Precomputed,
            Column::Witness(_) => ColumnCategory::Witness,
            Column::Shifted(_) => ColumnCategory::Shifted,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Column::Precomputed(c) => c.name(),
            Column::Witness(c) => c.name(),
            Column::Shifted(c) => c.name(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Column::Precomputed(c) => c.label(),
            Column::Witness(c) => c.label(),
            Column::Shifted(c) => c.label(),
        }
    }

    /// The shifted column reading from this one, if any
    pub fn shifted(self) -> Option<ShiftedColumn> {
        ShiftedColumn::ALL
            .into_iter()
            .find(|shifted| shifted.source() == self)
    }

    /// All 63 columns in container order
    pub fn all() -> impl Iterator<Item = Column> + Clone {
        PrecomputedColumn::ALL
            .into_iter()
            .map(Column::Precomputed)
            .chain(WitnessColumn::ALL.into_iter().map(Column::Witness))
            .chain(ShiftedColumn::ALL.into_iter().map(Column::Shifted))
    }

    pub fn descriptor(self) -> ColumnDescriptor {
        ColumnDescriptor {
            index: self.index(),
            name: self.name(),
            label: self.label(),
            category: self.category(),
        }
    }
}

impl From<PrecomputedColumn> for Column {
    fn from(column: PrecomputedColumn) -> Self {
        Column::Precomputed(column)
    }
}

impl From<WitnessColumn> for Column {
    fn from(column: WitnessColumn) -> Self {
        Column::Witness(column)
    }
}

impl From<ShiftedColumn> for Column {
    fn from(column: ShiftedColumn) -> Self {
        Column::Shifted(column)
    }
}

/// Ordered catalogue of every column
pub fn schema() -> impl Iterator<Item = ColumnDescriptor> {
    Column::all().map(Column::descriptor)
}

/// Sources of the shifted columns, in shifted-column order
pub const TO_BE_SHIFTED: [Column; 9] = [
    ShiftedColumn::Table1Shift.source(),
    ShiftedColumn::Table2Shift.source(),
    ShiftedColumn::Table3Shift.source(),
    ShiftedColumn::Table4Shift.source(),
    ShiftedColumn::WLShift.source(),
    ShiftedColumn::WRShift.source(),
    ShiftedColumn::WOShift.source(),
    ShiftedColumn::W4Shift.source(),
    ShiftedColumn::ZPermShift.source(),
];

/// Every column of the flavor: precomputed, then witness, then shifted
///
/// Used for evaluations at a point, commitment labels, prover univariates
/// and the verifier's commitment set.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllEntities<T> {
    pub precomputed: PrecomputedEntities<T>,
    pub witness: WitnessEntities<T>,
    pub shifted: ShiftedEntities<T>,
}

const _: () = assert!(
    core::mem::size_of::<AllEntities<u64>>() == NUM_ALL_ENTITIES * core::mem::size_of::<u64>()
);

impl<T> AllEntities<T> {
    pub const LEN: usize = NUM_ALL_ENTITIES;

    pub fn as_array(&self) -> &[T; NUM_ALL_ENTITIES] {
        // Safety: repr(C) concatenation of three repr(C) containers of T
        unsafe { &*(self as *const Self as *const [T; NUM_ALL_ENTITIES]) }
    }

    pub fn as_array_mut(&mut self) -> &mut [T; NUM_ALL_ENTITIES] {
        unsafe { &mut *(self as *mut Self as *mut [T; NUM_ALL_ENTITIES]) }
    }

    pub fn get_all(&self) -> core::slice::Iter<'_, T> {
        self.as_array().iter()
    }

    pub fn get_all_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.as_array_mut().iter_mut()
    }

    pub fn from_fn(mut f: impl FnMut(Column) -> T) -> Self {
        Self {
            precomputed: PrecomputedEntities::from_fn(|c| f(Column::Precomputed(c))),
            witness: WitnessEntities::from_fn(|c| f(Column::Witness(c))),
            shifted: ShiftedEntities::from_fn(|c| f(Column::Shifted(c))),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> AllEntities<U> {
        AllEntities {
            precomputed: self.precomputed.map(&mut f),
            witness: self.witness.map(&mut f),
            shifted: self.shifted.map(&mut f),
        }
    }

    pub fn map_ref<U>(&self, mut f: impl FnMut(&T) -> U) -> AllEntities<U> {
        AllEntities {
            precomputed: self.precomputed.map_ref(&mut f),
            witness: self.witness.map_ref(&mut f),
            shifted: self.shifted.map_ref(&mut f),
        }
    }

    /// View a row slice of exactly 63 elements as typed columns
    pub fn from_row(row: &[T]) -> &Self {
        assert_eq!(
            row.len(),
            NUM_ALL_ENTITIES,
            "AllEntities expects {NUM_ALL_ENTITIES} columns"
        );
        // Safety: length checked above; layout matches [T; NUM_ALL_ENTITIES]
        unsafe { &*(row.as_ptr() as *const Self) }
    }

    /// Precomputed followed by witness columns
    pub fn get_unshifted(&self) -> &[T] {
        &self.as_array()[..NUM_FOLDED_ENTITIES]
    }

    pub fn get_unshifted_mut(&mut self) -> &mut [T] {
        &mut self.as_array_mut()[..NUM_FOLDED_ENTITIES]
    }

    pub fn get_precomputed(&self) -> &[T; NUM_PRECOMPUTED_ENTITIES] {
        self.precomputed.as_array()
    }

    pub fn get_precomputed_mut(&mut self) -> &mut [T; NUM_PRECOMPUTED_ENTITIES] {
        self.precomputed.as_array_mut()
    }

    pub fn get_witness(&self) -> &[T] {
        self.witness.as_array()
    }

    pub fn get_witness_mut(&mut self) -> &mut [T] {
        self.witness.as_array_mut()
    }

    pub fn get_shifted(&self) -> &[T] {
        self.shifted.as_array()
    }

    pub fn get_shifted_mut(&mut self) -> &mut [T] {
        self.shifted.as_array_mut()
    }

    pub fn get_wires(&self) -> [&T; 4] {
        self.witness.get_wires()
    }

    pub fn get_ecc_op_wires(&self) -> [&T; 4] {
        self.witness.get_ecc_op_wires()
    }

    pub fn get_databus_entities(&self) -> [&T; 9] {
        self.witness.get_databus_entities()
    }

    pub fn get_databus_inverses(&self) -> [&T; 3] {
        self.witness.get_databus_inverses()
    }

    pub fn get_non_gate_selectors(&self) -> [&T; 6] {
        self.precomputed.get_non_gate_selectors()
    }

    pub fn get_gate_selectors(&self) -> [&T; 8] {
        self.precomputed.get_gate_selectors()
    }

    pub fn get_selectors(&self) -> [&T; 14] {
        self.precomputed.get_selectors()
    }

    pub fn get_sigmas(&self) -> [&T; 4] {
        self.precomputed.get_sigmas()
    }

    pub fn get_ids(&self) -> [&T; 4] {
        self.precomputed.get_ids()
    }

    pub fn get_tables(&self) -> [&T; 4] {
        self.precomputed.get_tables()
    }

    pub fn get_shifted_witnesses(&self) -> [&T; 5] {
        self.shifted.get_shifted_witnesses()
    }

    pub fn get_shifted_tables(&self) -> [&T; 4] {
        self.shifted.get_shifted_tables()
    }

    entity_subsets! {
        /// Sources of `get_shifted`, position for position
        fn get_to_be_shifted / get_to_be_shifted_mut -> [9] {
            precomputed.table_1, precomputed.table_2, precomputed.table_3, precomputed.table_4,
            witness.w_l, witness.w_r, witness.w_o, witness.w_4,
            witness.z_perm,
        }
    }

    /// Witness columns followed by the shifted witnesses
    pub fn get_all_witnesses(&self) -> impl Iterator<Item = &T> {
        self.witness
            .get_all()
            .chain(self.shifted.get_shifted_witnesses())
    }

    /// Complement of `get_all_witnesses`: precomputed columns and shifted tables
    pub fn get_non_witnesses(&self) -> impl Iterator<Item = &T> {
        self.precomputed
            .get_all()
            .chain(self.shifted.get_shifted_tables())
    }
}

impl AllEntities<&'static str> {
    /// Transcript labels of every column
    pub fn labels() -> Self {
        Self::from_fn(Column::label)
    }
}

impl<T> core::ops::Index<Column> for AllEntities<T> {
    type Output = T;

    fn index(&self, column: Column) -> &T {
        &self.as_array()[column.index()]
    }
}

impl<T> core::ops::IndexMut<Column> for AllEntities<T> {
    fn index_mut(&mut self, column: Column) -> &mut T {
        &mut self.as_array_mut()[column.index()]
    }
}

/// Pair two ordered sequences column by column.
///
/// Panics when the lengths differ: containers built from the same schema
/// always agree, so a mismatch means two different schemas are being mixed.
pub fn zip_view<A, B>(a: A, b: B) -> core::iter::Zip<A::IntoIter, B::IntoIter>
where
    A: IntoIterator,
    B: IntoIterator,
    A::IntoIter: ExactSizeIterator,
    B::IntoIter: ExactSizeIterator,
{
    let (a, b) = (a.into_iter(), b.into_iter());
    assert_eq!(a.len(), b.len(), "zipped entity views differ in length");
    a.zip(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::{NUM_SHIFTED_ENTITIES, NUM_WITNESS_ENTITIES};

    #[test]
    fn schema_is_contiguous_and_categorised() {
        let descriptors: Vec<_> = schema().collect();
        assert_eq!(descriptors.len(), 63);
        for (position, descriptor) in descriptors.iter().enumerate() {
            assert_eq!(descriptor.index, position);
            assert_eq!(Column::from_index(position).map(Column::index), Some(position));
        }
        let count = |category| {
            descriptors
                .iter()
                .filter(|d| d.category == category)
                .count()
        };
        assert_eq!(count(ColumnCategory::Precomputed), NUM_PRECOMPUTED_ENTITIES);
        assert_eq!(count(ColumnCategory::Witness), NUM_WITNESS_ENTITIES);
        assert_eq!(count(ColumnCategory::Shifted), NUM_SHIFTED_ENTITIES);
        assert_eq!(Column::from_index(63), None);
    }

    #[test]
    fn names_line_up_with_positions() {
        let names = AllEntities::<&str>::from_fn(Column::name);
        for column in Column::all() {
            assert_eq!(names[column], column.name());
            assert_eq!(names.get_all().nth(column.index()), Some(&column.name()));
        }
        assert_eq!(names.get_unshifted().len(), 54);
        assert_eq!(names.get_unshifted()[30], "w_l");
        assert_eq!(names.get_shifted()[0], "table_1_shift");
    }

    #[test]
    fn to_be_shifted_matches_shifted_order() {
        let names = AllEntities::<&str>::from_fn(Column::name);
        for (source, shifted) in zip_view(names.get_to_be_shifted(), names.get_shifted()) {
            assert_eq!(format!("{source}_shift"), *shifted);
        }
        for (source, column) in TO_BE_SHIFTED.iter().zip(names.get_to_be_shifted()) {
            assert_eq!(source.name(), *column);
        }
        assert_eq!(
            Column::Witness(WitnessColumn::ZPerm).shifted(),
            Some(ShiftedColumn::ZPermShift)
        );
        assert_eq!(Column::Witness(WitnessColumn::LookupInverses).shifted(), None);
    }

    #[test]
    fn witness_and_non_witness_partition_everything() {
        let names = AllEntities::<&str>::from_fn(Column::name);
        let witnesses: Vec<_> = names.get_all_witnesses().collect();
        let others: Vec<_> = names.get_non_witnesses().collect();
        assert_eq!(witnesses.len(), crate::flavor::NUM_ALL_WITNESS_ENTITIES);
        assert_eq!(others.len(), 34);
        for name in names.get_all() {
            assert!(witnesses.contains(&name) ^ others.contains(&name));
        }
    }

    #[test]
    #[should_panic(expected = "differ in length")]
    fn zipping_mismatched_views_is_fatal() {
        let names = AllEntities::<&str>::from_fn(Column::name);
        let _ = zip_view(names.get_precomputed(), names.get_witness());
    }
}
