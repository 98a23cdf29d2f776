//! The PNT header field table and its validation.

use std::collections::HashSet;

use crate::error::{SchemaError, SchemaResult};
use crate::field::{FieldDescriptor, FieldKind};
use crate::HEADER_SIZE;

use FieldKind::{Char, FixedBytes, Float32, Float64, Int16, Int32, Padding, UInt16};

const fn field(name: &'static str, kind: FieldKind, offset: u32, length: u32) -> FieldDescriptor {
    FieldDescriptor::new(name, kind, offset, length)
}

/// The header layout in file order.
///
/// `reserved 1` is listed after `GPS State` but declares offset 187, which
/// falls inside `Comment`. The device firmware defines the physical layout,
/// so the entry is kept as declared; padding is never written on encode.
pub static FIELD_TABLE: &[FieldDescriptor] = &[
    field("Version", UInt16, 0, 2),
    field("Tot Samples", Int32, 2, 4),
    field("Samples Dist [mm]", Float32, 6, 4).unit("mm"),
    field("CNV Force [N/mV]", Float32, 10, 4).unit("N/mV"),
    field("CNV Pressure [N/bar]", Float32, 14, 4).unit("N/bar"),
    field("Offset [N]", UInt16, 18, 2).unit("N"),
    field("Year", UInt16, 20, 2).unit("y"),
    field("Month", UInt16, 22, 2).unit("m"),
    field("Day", UInt16, 24, 2).unit("d"),
    field("Hour", UInt16, 26, 2).unit("h"),
    field("Min", UInt16, 28, 2).unit("min"),
    field("Sec", UInt16, 30, 2).unit("s"),
    field("X Coord", Float64, 32, 8).unit("deg"),
    field("Y Coord", Float64, 40, 8).unit("deg"),
    field("Z Coord", Float64, 48, 8).unit("deg"),
    field("Battery [V]", Float64, 56, 8).unit("V"),
    field("Speed [mm/s]", Float32, 64, 4).unit("mm/s"),
    field("Loopsize", Int32, 68, 4),
    field("Waypoints", Int32, 72, 40),
    field("Calstart", UInt16, 112, 20),
    field("Calend", UInt16, 132, 20),
    field("Length Comment", UInt16, 152, 2),
    field("Comment", FixedBytes(102), 154, 102),
    field("File Name", FixedBytes(8), 256, 8),
    field("Latitude", Float32, 264, 4).unit("deg"),
    field("Longitude", Float32, 268, 4).unit("deg"),
    field("Altitude [cm]", Float32, 272, 4).unit("cm"),
    field("PDOP", Float32, 276, 4),
    field("Northing", Char, 280, 1),
    field("Easting", Char, 281, 1),
    field("Num Sats", UInt16, 282, 2),
    field("Fix Mode", UInt16, 284, 2),
    field("GPS State", Char, 286, 1),
    field("reserved 1", Padding(1), 187, 1),
    field("X local", UInt16, 288, 2).unit("deg"),
    field("Y local", UInt16, 290, 2).unit("deg"),
    field("Z local", UInt16, 292, 2).unit("m"),
    field("Theta local", UInt16, 294, 2).unit("deg"),
    field("reserved 2", Padding(62), 296, 62),
    field("Force Samples", Int32, 358, 4),
    field("Temperature Samples", Int32, 362, 4),
    field("Kistler Range [pC]", UInt16, 366, 2).unit("pC"),
    field("Amp Range [pC]", UInt16, 368, 2).unit("pC"),
    field("Sensitivity [pC/N]", UInt16, 370, 2).unit("pC/N"),
    field("Temp Offset [K]", Int16, 372, 2).unit("°C"),
    field("Hand Op", UInt16, 374, 2),
    field("Diameter [um]", Int32, 376, 4).unit("um"),
    field("Overload [N]", UInt16, 380, 2).unit("N"),
    field("Sensor Type", Char, 382, 1),
    field("Amp Type", Char, 383, 1),
    field("SMP Serial", UInt16, 384, 2),
    field("Length [mm]", UInt16, 386, 2).unit("mm"),
    field("reserved 3", Padding(4), 388, 4),
    field("Sensor Serial", FixedBytes(20), 392, 20),
    field("Amp Serial", FixedBytes(20), 412, 20),
    field("reserved 4", Padding(80), 432, 80),
];

/// Returns the header layout in file order.
#[must_use]
pub fn describe() -> &'static [FieldDescriptor] {
    FIELD_TABLE
}

/// Looks up a descriptor and its table index by exact name.
#[must_use]
pub fn find(name: &str) -> Option<(usize, &'static FieldDescriptor)> {
    FIELD_TABLE
        .iter()
        .enumerate()
        .find(|(_, descriptor)| descriptor.name == name)
}

/// Validates table invariants.
///
/// Padding may overlap other fields; two non-padding fields may not.
pub fn validate(table: &[FieldDescriptor]) -> SchemaResult<()> {
    let mut seen = HashSet::new();
    for descriptor in table {
        if !seen.insert(descriptor.name) {
            return Err(SchemaError::DuplicateName {
                name: descriptor.name,
            });
        }
        validate_length(descriptor)?;
        if descriptor.end() > HEADER_SIZE {
            return Err(SchemaError::OutOfHeader {
                name: descriptor.name,
                end: descriptor.offset.saturating_add(descriptor.length),
                header_size: HEADER_SIZE,
            });
        }
    }

    let mut used: Vec<&FieldDescriptor> = table.iter().filter(|d| !d.kind.is_padding()).collect();
    used.sort_by_key(|d| d.offset);
    for pair in used.windows(2) {
        if pair[0].end() > pair[1].start() {
            return Err(SchemaError::Overlap {
                first: pair[0].name,
                second: pair[1].name,
            });
        }
    }
    Ok(())
}

fn validate_length(descriptor: &FieldDescriptor) -> SchemaResult<()> {
    let width = descriptor.kind.width();
    let ok = match descriptor.kind {
        FixedBytes(n) | Padding(n) => descriptor.length == n,
        Char => descriptor.length == 1,
        UInt16 | Int16 | Int32 | Float32 | Float64 => {
            descriptor.length > 0 && descriptor.length % width == 0
        }
    };
    if ok {
        Ok(())
    } else {
        Err(SchemaError::LengthMismatch {
            name: descriptor.name,
            length: descriptor.length,
            width,
        })
    }
}
