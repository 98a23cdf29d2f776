use proptest::prelude::*;
use schema::{find, validate, FieldDescriptor, FieldKind, FIELD_TABLE, HEADER_SIZE};

fn kind_strategy() -> impl Strategy<Value = FieldKind> {
    prop_oneof![
        Just(FieldKind::UInt16),
        Just(FieldKind::Int16),
        Just(FieldKind::Int32),
        Just(FieldKind::Float32),
        Just(FieldKind::Float64),
        Just(FieldKind::Char),
        (1u32..32).prop_map(FieldKind::FixedBytes),
    ]
}

proptest! {
    #[test]
    fn prop_packed_tables_validate(specs in prop::collection::vec((kind_strategy(), 1u32..4), 1..24)) {
        // Lay fields back to back; the result is valid whenever it fits.
        let names: Vec<&'static str> = (0..specs.len())
            .map(|i| {
                let leaked: &'static str = Box::leak(format!("f{i}").into_boxed_str());
                leaked
            })
            .collect();
        let mut offset = 0u32;
        let mut table = Vec::new();
        for ((kind, count), name) in specs.iter().zip(&names) {
            let count = if kind.is_numeric() { *count } else { 1 };
            let length = kind.width() * count;
            table.push(FieldDescriptor::new(name, *kind, offset, length));
            offset += length;
        }
        prop_assert_eq!(validate(&table).is_ok(), offset as usize <= HEADER_SIZE);
    }

    #[test]
    fn prop_find_returns_matching_index(index in 0usize..FIELD_TABLE.len()) {
        let name = FIELD_TABLE[index].name;
        let (found, descriptor) = find(name).unwrap();
        prop_assert_eq!(found, index);
        prop_assert_eq!(descriptor.name, name);
    }
}
