//! Column definitions for the three storage categories
//!
//! Each category is a `#[repr(C)]` struct generic over the element kind, so
//! the same declaration yields values, polynomials, commitments, labels and
//! univariates with identical field order. A companion enum names every
//! column by position.

use super::entities::Column;

/// Declare a category container together with its column enum.
///
/// Every field has type `T`, so the struct is layout-compatible with
/// `[T; COUNT]`; the generated `as_array` and `Borrow` impls rely on it.
macro_rules! define_entities {
    (
        $(#[$struct_meta:meta])*
        pub struct $name:ident;
        $(#[$enum_meta:meta])*
        pub enum $column:ident {
            $( $(#[$field_meta:meta])* $variant:ident => $field:ident : $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$struct_meta])*
        #[repr(C)]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name<T> {
            $( $(#[$field_meta])* pub $field: T, )+
        }

        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $column {
            $( $variant, )+
        }

        impl $column {
            /// Number of columns in this category
            pub const COUNT: usize = [$( stringify!($field) ),+].len();

            /// Every column in declaration order
            pub const ALL: [$column; $column::COUNT] = [$( $column::$variant ),+];

            pub const fn index(self) -> usize {
                self as usize
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $( $column::$variant => stringify!($field), )+
                }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $( $column::$variant => $label, )+
                }
            }

            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }
        }

        impl<T> $name<T> {
            pub const LEN: usize = $column::COUNT;

            pub fn as_array(&self) -> &[T; $column::COUNT] {
                // Safety: repr(C) with exactly COUNT fields of type T
                unsafe { &*(self as *const Self as *const [T; $column::COUNT]) }
            }

            pub fn as_array_mut(&mut self) -> &mut [T; $column::COUNT] {
                unsafe { &mut *(self as *mut Self as *mut [T; $column::COUNT]) }
            }

            /// All columns in declaration order
            pub fn get_all(&self) -> ::core::slice::Iter<'_, T> {
                self.as_array().iter()
            }

            pub fn get_all_mut(&mut self) -> ::core::slice::IterMut<'_, T> {
                self.as_array_mut().iter_mut()
            }

            pub fn get_labels() -> [&'static str; $column::COUNT] {
                [$( $label ),+]
            }

            pub fn from_fn(mut f: impl FnMut($column) -> T) -> Self {
                Self {
                    $( $field: f($column::$variant), )+
                }
            }

            pub fn from_array(values: [T; $column::COUNT]) -> Self {
                let [$( $field ),+] = values;
                Self { $( $field ),+ }
            }

            pub fn into_array(self) -> [T; $column::COUNT] {
                [$( self.$field ),+]
            }

            pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> $name<U> {
                $name {
                    $( $field: f(self.$field), )+
                }
            }

            pub fn map_ref<U>(&self, mut f: impl FnMut(&T) -> U) -> $name<U> {
                $name {
                    $( $field: f(&self.$field), )+
                }
            }

            /// View a row slice of exactly `COUNT` elements as typed columns
            pub fn from_row(row: &[T]) -> &Self {
                match <&[T; $column::COUNT]>::try_from(row) {
                    Ok(array) => <[T; $column::COUNT] as ::core::borrow::Borrow<Self>>::borrow(array),
                    Err(_) => panic!(
                        "{} expects {} columns, row has {}",
                        stringify!($name),
                        $column::COUNT,
                        row.len()
                    ),
                }
            }
        }

        impl<T> ::core::ops::Index<$column> for $name<T> {
            type Output = T;

            fn index(&self, column: $column) -> &T {
                &self.as_array()[column.index()]
            }
        }

        impl<T> ::core::ops::IndexMut<$column> for $name<T> {
            fn index_mut(&mut self, column: $column) -> &mut T {
                &mut self.as_array_mut()[column.index()]
            }
        }

        // Allow converting between the container and [T; COUNT]
        impl<T> ::core::borrow::Borrow<$name<T>> for [T; $column::COUNT] {
            fn borrow(&self) -> &$name<T> {
                // Safety: repr(C) with exactly COUNT fields of type T
                unsafe { &*(self.as_ptr() as *const $name<T>) }
            }
        }

        impl<T> ::core::borrow::BorrowMut<$name<T>> for [T; $column::COUNT] {
            fn borrow_mut(&mut self) -> &mut $name<T> {
                unsafe { &mut *(self.as_mut_ptr() as *mut $name<T>) }
            }
        }

        const _: () = assert!(
            ::core::mem::size_of::<$name<u64>>() == $column::COUNT * ::core::mem::size_of::<u64>()
        );
    };
}

/// Fixed-size reference arrays over a named subset of fields.
macro_rules! entity_subsets {
    (
        $(
            $(#[$meta:meta])*
            fn $get:ident / $get_mut:ident -> [$len:literal] { $( $($path:ident).+ ),+ $(,)? }
        )*
    ) => {
        $(
            $(#[$meta])*
            pub fn $get(&self) -> [&T; $len] {
                [ $( &self.$($path).+ ),+ ]
            }

            pub fn $get_mut(&mut self) -> [&mut T; $len] {
                [ $( &mut self.$($path).+ ),+ ]
            }
        )*
    };
}

pub(crate) use entity_subsets;

define_entities! {
    /// Circuit-shape columns, independent of the witness
    ///
    /// Total: 30 columns
    pub struct PrecomputedEntities;

    /// Position of a precomputed column
    pub enum PrecomputedColumn {
        // === Non-gate selectors (6 columns) ===
        /// Multiplication selector
        QM => q_m: "Q_M",
        /// Constant selector
        QC => q_c: "Q_C",
        QL => q_l: "Q_L",
        QR => q_r: "Q_R",
        QO => q_o: "Q_O",
        Q4 => q_4: "Q_4",

        // === Gate-type selectors (8 columns) ===
        QArith => q_arith: "Q_ARITH",
        /// Sorted-range gates
        QDeltaRange => q_delta_range: "Q_SORT",
        QElliptic => q_elliptic: "Q_ELLIPTIC",
        /// RAM/ROM and non-native field gates
        QAux => q_aux: "Q_AUX",
        QLookup => q_lookup: "Q_LOOKUP",
        /// Data bus reads; the bus is picked by q_l / q_r / q_o
        QBusread => q_busread: "Q_BUSREAD",
        QPoseidon2External => q_poseidon2_external: "Q_POSEIDON2_EXTERNAL",
        QPoseidon2Internal => q_poseidon2_internal: "Q_POSEIDON2_INTERNAL",

        // === Permutation (8 columns) ===
        Sigma1 => sigma_1: "SIGMA_1",
        Sigma2 => sigma_2: "SIGMA_2",
        Sigma3 => sigma_3: "SIGMA_3",
        Sigma4 => sigma_4: "SIGMA_4",
        Id1 => id_1: "ID_1",
        Id2 => id_2: "ID_2",
        Id3 => id_3: "ID_3",
        Id4 => id_4: "ID_4",

        // === Lookup tables (4 columns) ===
        Table1 => table_1: "TABLE_1",
        Table2 => table_2: "TABLE_2",
        Table3 => table_3: "TABLE_3",
        Table4 => table_4: "TABLE_4",

        // === Indicators (4 columns) ===
        /// 1 at row 0 only
        LagrangeFirst => lagrange_first: "LAGRANGE_FIRST",
        /// 1 at the last row only
        LagrangeLast => lagrange_last: "LAGRANGE_LAST",
        /// 1 on elliptic-curve operation queue rows
        LagrangeEccOp => lagrange_ecc_op: "Q_ECC_OP_QUEUE",
        /// id_i = i, indexes the data bus columns
        DatabusId => databus_id: "DATABUS_ID",
    }
}

impl<T> PrecomputedEntities<T> {
    entity_subsets! {
        fn get_non_gate_selectors / get_non_gate_selectors_mut -> [6] {
            q_m, q_c, q_l, q_r, q_o, q_4
        }
        fn get_gate_selectors / get_gate_selectors_mut -> [8] {
            q_arith, q_delta_range, q_elliptic, q_aux,
            q_lookup, q_busread, q_poseidon2_external, q_poseidon2_internal
        }
        /// Non-gate selectors followed by gate selectors
        fn get_selectors / get_selectors_mut -> [14] {
            q_m, q_c, q_l, q_r, q_o, q_4,
            q_arith, q_delta_range, q_elliptic, q_aux,
            q_lookup, q_busread, q_poseidon2_external, q_poseidon2_internal
        }
        fn get_sigmas / get_sigmas_mut -> [4] { sigma_1, sigma_2, sigma_3, sigma_4 }
        fn get_ids / get_ids_mut -> [4] { id_1, id_2, id_3, id_4 }
        fn get_tables / get_tables_mut -> [4] { table_1, table_2, table_3, table_4 }
    }
}

define_entities! {
    /// Columns filled per execution: 4 wires and 20 derived columns
    ///
    /// Total: 24 columns
    pub struct WitnessEntities;

    /// Position of a witness column
    pub enum WitnessColumn {
        // === Wires (4 columns) ===
        WL => w_l: "W_L",
        WR => w_r: "W_R",
        WO => w_o: "W_O",
        /// Also carries the RAM/ROM memory record once folded
        W4 => w_4: "W_4",

        // === Permutation and lookup (4 columns) ===
        /// Permutation grand product accumulator
        ZPerm => z_perm: "Z_PERM",
        LookupInverses => lookup_inverses: "LOOKUP_INVERSES",
        LookupReadCounts => lookup_read_counts: "LOOKUP_READ_COUNTS",
        LookupReadTags => lookup_read_tags: "LOOKUP_READ_TAGS",

        // === Elliptic-curve operation queue (4 columns) ===
        EccOpWire1 => ecc_op_wire_1: "ECC_OP_WIRE_1",
        EccOpWire2 => ecc_op_wire_2: "ECC_OP_WIRE_2",
        EccOpWire3 => ecc_op_wire_3: "ECC_OP_WIRE_3",
        EccOpWire4 => ecc_op_wire_4: "ECC_OP_WIRE_4",

        // === Data bus (12 columns) ===
        Calldata => calldata: "CALLDATA",
        CalldataReadCounts => calldata_read_counts: "CALLDATA_READ_COUNTS",
        CalldataReadTags => calldata_read_tags: "CALLDATA_READ_TAGS",
        CalldataInverses => calldata_inverses: "CALLDATA_INVERSES",
        SecondaryCalldata => secondary_calldata: "SECONDARY_CALLDATA",
        SecondaryCalldataReadCounts => secondary_calldata_read_counts: "SECONDARY_CALLDATA_READ_COUNTS",
        SecondaryCalldataReadTags => secondary_calldata_read_tags: "SECONDARY_CALLDATA_READ_TAGS",
        SecondaryCalldataInverses => secondary_calldata_inverses: "SECONDARY_CALLDATA_INVERSES",
        ReturnData => return_data: "RETURN_DATA",
        ReturnDataReadCounts => return_data_read_counts: "RETURN_DATA_READ_COUNTS",
        ReturnDataReadTags => return_data_read_tags: "RETURN_DATA_READ_TAGS",
        ReturnDataInverses => return_data_inverses: "RETURN_DATA_INVERSES",
    }
}

impl<T> WitnessEntities<T> {
    entity_subsets! {
        fn get_wires / get_wires_mut -> [4] { w_l, w_r, w_o, w_4 }
        fn get_ecc_op_wires / get_ecc_op_wires_mut -> [4] {
            ecc_op_wire_1, ecc_op_wire_2, ecc_op_wire_3, ecc_op_wire_4
        }
        /// Bus values with their bookkeeping, inverses excluded
        fn get_databus_entities / get_databus_entities_mut -> [9] {
            calldata, calldata_read_counts, calldata_read_tags,
            secondary_calldata, secondary_calldata_read_counts, secondary_calldata_read_tags,
            return_data, return_data_read_counts, return_data_read_tags
        }
        fn get_databus_inverses / get_databus_inverses_mut -> [3] {
            calldata_inverses, secondary_calldata_inverses, return_data_inverses
        }
    }

    /// Value, read-count and read-tag columns of one bus
    pub fn get_bus_entities(&self, bus: BusKind) -> [&T; 3] {
        let columns = bus.columns();
        [
            &self[columns.value],
            &self[columns.read_counts],
            &self[columns.read_tags],
        ]
    }
}

define_entities! {
    /// One-row shifts of the tables, wires and permutation accumulator
    ///
    /// Total: 9 columns
    pub struct ShiftedEntities;

    /// Position of a shifted column
    pub enum ShiftedColumn {
        Table1Shift => table_1_shift: "TABLE_1_SHIFT",
        Table2Shift => table_2_shift: "TABLE_2_SHIFT",
        Table3Shift => table_3_shift: "TABLE_3_SHIFT",
        Table4Shift => table_4_shift: "TABLE_4_SHIFT",
        WLShift => w_l_shift: "W_L_SHIFT",
        WRShift => w_r_shift: "W_R_SHIFT",
        WOShift => w_o_shift: "W_O_SHIFT",
        W4Shift => w_4_shift: "W_4_SHIFT",
        ZPermShift => z_perm_shift: "Z_PERM_SHIFT",
    }
}

impl<T> ShiftedEntities<T> {
    entity_subsets! {
        fn get_shifted_tables / get_shifted_tables_mut -> [4] {
            table_1_shift, table_2_shift, table_3_shift, table_4_shift
        }
        fn get_shifted_witnesses / get_shifted_witnesses_mut -> [5] {
            w_l_shift, w_r_shift, w_o_shift, w_4_shift, z_perm_shift
        }
    }
}

impl ShiftedColumn {
    /// The unshifted column this one reads from, one row ahead
    pub const fn source(self) -> Column {
        match self {
            ShiftedColumn::Table1Shift => Column::Precomputed(PrecomputedColumn::Table1),
            ShiftedColumn::Table2Shift => Column::Precomputed(PrecomputedColumn::Table2),
            ShiftedColumn::Table3Shift => Column::Precomputed(PrecomputedColumn::Table3),
            ShiftedColumn::Table4Shift => Column::Precomputed(PrecomputedColumn::Table4),
            ShiftedColumn::WLShift => Column::Witness(WitnessColumn::WL),
            ShiftedColumn::WRShift => Column::Witness(WitnessColumn::WR),
            ShiftedColumn::WOShift => Column::Witness(WitnessColumn::WO),
            ShiftedColumn::W4Shift => Column::Witness(WitnessColumn::W4),
            ShiftedColumn::ZPermShift => Column::Witness(WitnessColumn::ZPerm),
        }
    }
}

/// The three data bus channels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BusKind {
    Calldata,
    SecondaryCalldata,
    ReturnData,
}

/// Witness columns that make up one bus channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusColumns {
    pub value: WitnessColumn,
    pub read_counts: WitnessColumn,
    pub read_tags: WitnessColumn,
    pub inverses: WitnessColumn,
}

impl BusKind {
    pub const ALL: [BusKind; 3] = [
        BusKind::Calldata,
        BusKind::SecondaryCalldata,
        BusKind::ReturnData,
    ];

    pub const fn columns(self) -> BusColumns {
        match self {
            BusKind::Calldata => BusColumns {
                value: WitnessColumn::Calldata,
                read_counts: WitnessColumn::CalldataReadCounts,
                read_tags: WitnessColumn::CalldataReadTags,
                inverses: WitnessColumn::CalldataInverses,
            },
            BusKind::SecondaryCalldata => BusColumns {
                value: WitnessColumn::SecondaryCalldata,
                read_counts: WitnessColumn::SecondaryCalldataReadCounts,
                read_tags: WitnessColumn::SecondaryCalldataReadTags,
                inverses: WitnessColumn::SecondaryCalldataInverses,
            },
            BusKind::ReturnData => BusColumns {
                value: WitnessColumn::ReturnData,
                read_counts: WitnessColumn::ReturnDataReadCounts,
                read_tags: WitnessColumn::ReturnDataReadTags,
                inverses: WitnessColumn::ReturnDataInverses,
            },
        }
    }

    /// Selector that routes a q_busread gate to this bus
    pub const fn selector(self) -> PrecomputedColumn {
        match self {
            BusKind::Calldata => PrecomputedColumn::QL,
            BusKind::SecondaryCalldata => PrecomputedColumn::QR,
            BusKind::ReturnData => PrecomputedColumn::QO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_sizes() {
        assert_eq!(PrecomputedColumn::COUNT, 30);
        assert_eq!(WitnessColumn::COUNT, 24);
        assert_eq!(ShiftedColumn::COUNT, 9);
    }

    #[test]
    fn enum_order_matches_field_order() {
        let names = PrecomputedEntities::<usize>::from_fn(|c| c.index());
        for (position, index) in names.get_all().enumerate() {
            assert_eq!(position, *index);
        }
        let witness = WitnessEntities::<&str>::from_fn(|c| c.name());
        assert_eq!(*witness.get_all().next().unwrap(), "w_l");
        assert_eq!(witness.as_array()[WitnessColumn::ZPerm.index()], "z_perm");
        assert_eq!(witness.z_perm, "z_perm");
    }

    #[test]
    fn subsets_pick_the_named_fields() {
        let pre = PrecomputedEntities::<&str>::from_fn(|c| c.name());
        assert_eq!(pre.get_gate_selectors()[5], &"q_busread");
        assert_eq!(pre.get_sigmas().map(|s| *s), ["sigma_1", "sigma_2", "sigma_3", "sigma_4"]);
        assert_eq!(pre.get_selectors()[..6], pre.get_non_gate_selectors()[..]);
        assert_eq!(pre.get_selectors()[6..], pre.get_gate_selectors()[..]);

        let witness = WitnessEntities::<&str>::from_fn(|c| c.name());
        assert_eq!(
            witness.get_bus_entities(BusKind::SecondaryCalldata).map(|s| *s),
            [
                "secondary_calldata",
                "secondary_calldata_read_counts",
                "secondary_calldata_read_tags"
            ]
        );
        assert_eq!(
            witness.get_databus_inverses().map(|s| *s),
            ["calldata_inverses", "secondary_calldata_inverses", "return_data_inverses"]
        );
    }

    #[test]
    fn row_slices_borrow_as_containers() {
        let row: Vec<u32> = (0..24).collect();
        let witness = WitnessEntities::from_row(&row);
        assert_eq!(witness.w_4, 3);
        assert_eq!(witness.return_data_inverses, 23);
    }

    #[test]
    fn mutable_subsets_write_through() {
        let mut pre = PrecomputedEntities::<u32>::default();
        for (i, table) in pre.get_tables_mut().into_iter().enumerate() {
            *table = i as u32 + 1;
        }
        assert_eq!(pre[PrecomputedColumn::Table3], 3);
        assert_eq!(pre.table_4, 4);
    }

    #[test]
    fn labels_follow_declaration_order() {
        let labels = ShiftedEntities::<()>::get_labels();
        assert_eq!(labels[0], "TABLE_1_SHIFT");
        assert_eq!(labels[8], "Z_PERM_SHIFT");
        assert_eq!(PrecomputedColumn::QDeltaRange.label(), "Q_SORT");
    }
}
