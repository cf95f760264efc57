//! Contract fields, absent from published offset maps

use crate::core::types::{category, BitSpan, FieldDescriptor};
use lazy_static::lazy_static;

fn labels(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|v| v.to_string()).collect())
}

fn years() -> Option<Vec<String>> {
    Some(
        (0..=7)
            .map(|n| match n {
                1 => "1 year".to_string(),
                n => format!("{} years", n),
            })
            .collect(),
    )
}

fn contract(name: &str, offset: u64, start_bit: u8, width: u8, values: Option<Vec<String>>) -> FieldDescriptor {
    FieldDescriptor::new(category::CONTRACT, name, BitSpan::new(offset, start_bit, width), values)
}

lazy_static! {
    /// Built-in Contract category
    pub static ref CONTRACT_FIELDS: Vec<FieldDescriptor> = {
        let option = ["None", "Team", "Player", "2 Yr Team"];
        let yes_no = ["No", "Yes"];
        vec![
            contract("Original Contract Length", 0x302, 4, 3, years()),
            contract("Years Left", 0x390, 0, 5, None),
            contract("Bird Years", 0x34E, 6, 5, None),
            contract(
                "Free Agency Type",
                0x300,
                4,
                2,
                labels(&["Unrestricted", "Restricted", "Rookie Restricted"]),
            ),
            contract("Option", 0x2FA, 5, 2, labels(&option)),
            contract("No Trade", 0x1B6, 2, 1, labels(&yes_no)),
            contract("Extension Length", 0x30A, 2, 3, years()),
            contract("Extension Option", 0x303, 6, 2, labels(&option)),
            contract("Extension No Trade", 0x2F8, 5, 1, labels(&yes_no)),
        ]
    };
}
