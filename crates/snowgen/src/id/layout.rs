use core::fmt;

use crate::SnowgenId;

/// One named field of a packed ID, used to render its layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FieldLayout {
    pub(crate) name: &'static str,
    pub(crate) bits: u8,
    pub(crate) value: u64,
}

/// Describes how a packed ID splits into fields, MSB first.
pub(crate) trait BitLayout {
    fn raw(&self) -> u64;
    fn fields(&self) -> [FieldLayout; 5];
}

impl BitLayout for SnowgenId {
    fn raw(&self) -> u64 {
        self.to_raw()
    }

    fn fields(&self) -> [FieldLayout; 5] {
        [
            FieldLayout {
                name: "reserved",
                bits: 1,
                value: self.to_raw() >> 63,
            },
            FieldLayout {
                name: "timestamp",
                bits: 41,
                value: self.timestamp(),
            },
            FieldLayout {
                name: "datacenter",
                bits: 5,
                value: self.datacenter_id(),
            },
            FieldLayout {
                name: "machine",
                bits: 5,
                value: self.machine_id(),
            },
            FieldLayout {
                name: "sequence",
                bits: 12,
                value: self.sequence(),
            },
        ]
    }
}

fn center(s: impl ToString, width: usize) -> String {
    let s = s.to_string();
    let len = s.len();
    if len >= width {
        return s;
    }
    let pad = width - len;
    let left = pad / 2;
    let right = pad - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

fn write_border(f: &mut fmt::Formatter<'_>, columns: &[usize]) -> fmt::Result {
    write!(f, "        +")?;
    for &w in columns {
        write!(f, "{}+", "-".repeat(w))?;
    }
    writeln!(f)
}

/// Writes a boxed table of every field in decimal and hex.
///
/// ```text
/// SnowgenId {
///     raw id     : 0x00000078900a9007 (517812686855)
///     padded     : 00000000517812686855
///     layout     :
///         +--------------+----------------+----------------+-------------+---------------+
///         | reserved (1) | timestamp (41) | datacenter (5) | machine (5) | sequence (12) |
///         +--------------+----------------+----------------+-------------+---------------+
///         |      0       |     123456     |       5        |      9      |       7       |
///         |     0x0      |    0x1e240     |      0x5       |     0x9     |      0x7      |
///         +--------------+----------------+----------------+-------------+---------------+
/// }
/// ```
pub(crate) fn write_bit_layout_debug(
    f: &mut fmt::Formatter<'_>,
    id: &impl BitLayout,
    type_name: &str,
) -> fmt::Result {
    let fields = id.fields();

    // Widest of label, decimal and hex per column, plus padding
    let columns: Vec<usize> = fields
        .iter()
        .map(|field| {
            let label_len = format!("{} ({})", field.name, field.bits).len();
            let dec_len = field.value.to_string().len();
            let hex_len = format!("0x{:x}", field.value).len();
            label_len.max(dec_len).max(hex_len) + 2
        })
        .collect();

    writeln!(f, "{type_name} {{")?;
    writeln!(f, "    raw id     : 0x{:016x} ({})", id.raw(), id.raw())?;
    writeln!(f, "    padded     : {:020}", id.raw())?;
    writeln!(f, "    layout     :")?;

    write_border(f, &columns)?;

    write!(f, "        |")?;
    for (field, &w) in fields.iter().zip(&columns) {
        let label = format!("{} ({})", field.name, field.bits);
        write!(f, "{}|", center(label, w))?;
    }
    writeln!(f)?;

    write_border(f, &columns)?;

    write!(f, "        |")?;
    for (field, &w) in fields.iter().zip(&columns) {
        write!(f, "{}|", center(field.value, w))?;
    }
    writeln!(f)?;

    write!(f, "        |")?;
    for (field, &w) in fields.iter().zip(&columns) {
        write!(f, "{}|", center(format!("0x{:x}", field.value), w))?;
    }
    writeln!(f)?;

    write_border(f, &columns)?;

    write!(f, "}}")
}
