//! # Exception Specification Text
//!
//! Two renderings of an [`ExceptionSpec`]:
//!
//! * prose, used in official and friendly text and in question conditions:
//!   `fish of heading 0304, materials of chapter 01 through to chapter 02`
//! * the encoded form, used by the dump: `0304 material 'fish',01-02`
//!
//! In a list, a `Single` whose material equals that of the `Single` right before it
//! is printed without the `<material> of` prefix, so consecutive entries of the same
//! material read as one enumeration.

use super::{hscode::format_hs_code, quote};
use crate::ast::ExceptionSpec;

pub fn to_prose(spec: &ExceptionSpec) -> String {
    match spec {
        ExceptionSpec::Single { .. } => single_prose(spec, true),
        ExceptionSpec::Range(from, to) => format!("{} through to {}", to_prose(from), to_prose(to)),
        ExceptionSpec::List(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let previous = index.checked_sub(1).and_then(|i| items.get(i));
                match (item, previous) {
                    (
                        ExceptionSpec::Single { material, .. },
                        Some(ExceptionSpec::Single {
                            material: previous_material,
                            ..
                        }),
                    ) if material == previous_material => single_prose(item, false),
                    _ => to_prose(item),
                }
            })
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn single_prose(spec: &ExceptionSpec, print_material: bool) -> String {
    let ExceptionSpec::Single {
        code,
        material,
        extra,
    } = spec
    else {
        return to_prose(spec);
    };
    let mut output = String::new();
    if print_material {
        output.push_str(material.as_deref().unwrap_or("materials"));
        output.push_str(" of ");
    }
    output.push_str(&format_hs_code(code));
    if let Some(extra) = extra {
        output.push(' ');
        output.push_str(extra);
    }
    output
}

/// One "provided that it is not a change from ..." sentence per list entry,
/// nested lists flattened depth first.
pub fn to_conditions(spec: &ExceptionSpec) -> Vec<String> {
    match spec {
        ExceptionSpec::List(items) => items.iter().flat_map(to_conditions).collect(),
        _ => vec![format!(
            "provided that it is not a change from {}",
            to_prose(spec)
        )],
    }
}

pub fn to_encoded(spec: &ExceptionSpec) -> String {
    match spec {
        ExceptionSpec::Single {
            code,
            material,
            extra,
        } => {
            let mut output = code.clone();
            if let Some(material) = material {
                output.push_str(" material ");
                output.push_str(&quote(material));
            }
            if let Some(extra) = extra {
                output.push_str(" extra ");
                output.push_str(&quote(extra));
            }
            output
        }
        ExceptionSpec::Range(from, to) => format!("{}-{}", to_encoded(from), to_encoded(to)),
        ExceptionSpec::List(items) => items.iter().map(to_encoded).collect::<Vec<_>>().join(","),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_with_material() {
        let spec = ExceptionSpec::single("0304").with_material("fish");
        assert_eq!(to_prose(&spec), "fish of heading 0304");
        assert_eq!(to_encoded(&spec), "0304 material 'fish'");
    }

    #[test]
    fn test_list_suppresses_repeated_material() {
        let spec = ExceptionSpec::List(vec![
            ExceptionSpec::single("01"),
            ExceptionSpec::single("02"),
            ExceptionSpec::single("03").with_material("fish"),
            ExceptionSpec::single("04").with_material("fish"),
        ]);
        assert_eq!(
            to_prose(&spec),
            "materials of chapter 01, chapter 02, fish of chapter 03, chapter 04"
        );
    }

    #[test]
    fn test_range_prints_both_materials() {
        let spec = ExceptionSpec::range(
            ExceptionSpec::single("01").with_material("M01").with_extra("E01"),
            ExceptionSpec::single("02").with_material("M01").with_extra("E02"),
        );
        assert_eq!(
            to_prose(&spec),
            "M01 of chapter 01 E01 through to M01 of chapter 02 E02"
        );
        assert_eq!(
            to_encoded(&spec),
            "01 material 'M01' extra 'E01'-02 material 'M01' extra 'E02'"
        );
    }

    #[test]
    fn test_range_then_single_keeps_material() {
        let spec = ExceptionSpec::List(vec![
            ExceptionSpec::range(ExceptionSpec::single("02"), ExceptionSpec::single("0303")),
            ExceptionSpec::single("0404"),
        ]);
        assert_eq!(
            to_prose(&spec),
            "materials of chapter 02 through to materials of heading 0303, materials of heading 0404"
        );
        assert_eq!(to_encoded(&spec), "02-0303,0404");
    }

    #[test]
    fn test_conditions_flatten_lists() {
        let spec = ExceptionSpec::List(vec![
            ExceptionSpec::single("01"),
            ExceptionSpec::List(vec![
                ExceptionSpec::single("02"),
                ExceptionSpec::range(ExceptionSpec::single("03"), ExceptionSpec::single("04")),
            ]),
        ]);
        assert_eq!(
            to_conditions(&spec),
            vec![
                "provided that it is not a change from materials of chapter 01".to_string(),
                "provided that it is not a change from materials of chapter 02".to_string(),
                "provided that it is not a change from materials of chapter 03 through to materials of chapter 04"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_encoded_quotes_apostrophes() {
        let spec = ExceptionSpec::single("01").with_extra("producer's");
        assert_eq!(to_encoded(&spec), "01 extra \"producer's\"");
    }
}
