//! Compound property expansion: shorthands → canonical longhand keys.

/// Expand a declaration into the longhand declarations stored in the cascade.
///
/// - `margin`/`padding` follow CSS box shorthand (1-4 values, extras ignored)
/// - `width`/`height` lock the size: `min-*` and `max-*` with the same value
/// - `tooltip` text is quoted unless it already is
pub fn expand(key: &str, value: &str) -> Vec<(String, String)> {
    match key {
        "width" | "height" => vec![
            (format!("min-{key}"), value.to_owned()),
            (format!("max-{key}"), value.to_owned()),
        ],
        "margin" | "padding" => {
            let args: Vec<&str> = value.split_whitespace().collect();
            let Some(&top) = args.first() else {
                return vec![(key.to_owned(), value.to_owned())];
            };
            let right = args.get(1).copied().unwrap_or(top);
            let bottom = args.get(2).copied().unwrap_or(top);
            let left = args.get(3).copied().unwrap_or(right);
            vec![
                (format!("{key}-top"), top.to_owned()),
                (format!("{key}-right"), right.to_owned()),
                (format!("{key}-bottom"), bottom.to_owned()),
                (format!("{key}-left"), left.to_owned()),
            ]
        }
        "tooltip" if !is_quoted(value) => vec![(key.to_owned(), format!("\"{value}\""))],
        _ => vec![(key.to_owned(), value.to_owned())],
    }
}

/// The longhand keys a declaration of `key` would produce.
pub fn expanded_keys(key: &str) -> Vec<String> {
    expand(key, "0").into_iter().map(|(k, _)| k).collect()
}

fn is_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('"') && value.ends_with('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn margin_one_value() {
        assert_eq!(
            expand("margin", "4px"),
            owned(&[
                ("margin-top", "4px"),
                ("margin-right", "4px"),
                ("margin-bottom", "4px"),
                ("margin-left", "4px"),
            ])
        );
    }

    #[test]
    fn margin_two_values() {
        assert_eq!(
            expand("margin", "4px 8px"),
            owned(&[
                ("margin-top", "4px"),
                ("margin-right", "8px"),
                ("margin-bottom", "4px"),
                ("margin-left", "8px"),
            ])
        );
    }

    #[test]
    fn padding_three_values() {
        assert_eq!(
            expand("padding", "1px 2px 3px"),
            owned(&[
                ("padding-top", "1px"),
                ("padding-right", "2px"),
                ("padding-bottom", "3px"),
                ("padding-left", "2px"),
            ])
        );
    }

    #[test]
    fn padding_four_values() {
        assert_eq!(
            expand("padding", "1px 2px 3px 4px"),
            owned(&[
                ("padding-top", "1px"),
                ("padding-right", "2px"),
                ("padding-bottom", "3px"),
                ("padding-left", "4px"),
            ])
        );
    }

    #[test]
    fn extra_box_values_ignored() {
        assert_eq!(expand("margin", "1px 2px 3px 4px 5px").len(), 4);
    }

    #[test]
    fn width_locks_size() {
        assert_eq!(
            expand("width", "48px"),
            owned(&[("min-width", "48px"), ("max-width", "48px")])
        );
    }

    #[test]
    fn tooltip_gets_quoted() {
        assert_eq!(expand("tooltip", "Home"), owned(&[("tooltip", "\"Home\"")]));
        assert_eq!(expand("tooltip", "\"Home\""), owned(&[("tooltip", "\"Home\"")]));
    }

    #[test]
    fn passthrough() {
        assert_eq!(expand("color", "red"), owned(&[("color", "red")]));
    }

    #[test]
    fn keys_of_compound() {
        assert_eq!(
            expanded_keys("padding"),
            vec!["padding-top", "padding-right", "padding-bottom", "padding-left"]
        );
        assert_eq!(expanded_keys("opacity"), vec!["opacity"]);
    }
}
