use super::{DecoratorOptions, Position, Querier, is_valid_level};

/// Produces one label per heading for a single rendering pass.
///
/// In ordered mode every in-range call advances the embedded [`Querier`],
/// even when the resulting label is suppressed, so later labels stay in step
/// with the document. Levels beyond `max_rec_level` leave no trace.
///
/// # Examples
///
/// ```
/// # use heading_decorator::decorator::{Counter, DecoratorOptions};
/// let options = DecoratorOptions::default();
/// let mut counter = Counter::new(&options);
/// let labels: Vec<_> = [1, 2, 1, 2]
///     .into_iter()
///     .map(|level| counter.decorate(level, None))
///     .collect();
/// assert_eq!(labels, vec!["1", "1.1", "2", "2.1"]);
/// ```
#[derive(Debug, Clone)]
pub struct Counter<'a> {
    options: &'a DecoratorOptions,
    querier: Querier,
}

impl<'a> Counter<'a> {
    pub fn new(options: &'a DecoratorOptions) -> Self {
        Self {
            options,
            querier: Querier::new(options.allow_zero_level, options.max_rec_level),
        }
    }

    /// Label for the next heading at `level`, padded for `position`.
    ///
    /// Returns an empty string when the level is out of range, beyond the
    /// recursion ceiling, or suppressed by `ignore_top_level`.
    pub fn decorate(&mut self, level: usize, position: Option<Position>) -> String {
        let label = if self.options.ordered {
            self.ordered_label(level)
        } else {
            self.unordered_label(level)
        };
        Position::pad(position, label)
    }

    fn unordered_label(&self, level: usize) -> String {
        if !is_valid_level(level) || level > self.options.max_rec_level {
            return String::new();
        }
        self.options.level_headings[level - 1].clone()
    }

    fn ordered_label(&mut self, level: usize) -> String {
        let options = self.options;
        let counters = self.querier.observe(level);
        if counters.is_empty() || level <= options.ignore_top_level {
            return String::new();
        }

        let mut label = counters[options.ignore_top_level..]
            .iter()
            .map(|&value| options.render_entry(value))
            .collect::<Vec<_>>()
            .join(&options.delimiter);

        if options.leading_delimiter {
            label.insert_str(0, options.leading_marker());
        }
        if options.trailing_delimiter {
            label.push_str(options.trailing_marker());
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorator::{StyleType, parse_custom_idents};

    fn labels(options: &DecoratorOptions, levels: &[usize]) -> Vec<String> {
        let mut counter = Counter::new(options);
        levels
            .iter()
            .map(|&level| counter.decorate(level, None))
            .collect()
    }

    #[test]
    fn test_depth_first_decimal() {
        let options = DecoratorOptions::default();
        assert_eq!(
            labels(&options, &[1, 2, 3, 4, 5, 6]),
            vec![
                "1",
                "1.1",
                "1.1.1",
                "1.1.1.1",
                "1.1.1.1.1",
                "1.1.1.1.1.1"
            ]
        );
    }

    #[test]
    fn test_sibling_increment() {
        let options = DecoratorOptions::default();
        assert_eq!(
            labels(&options, &[1, 2, 1, 2]),
            vec!["1", "1.1", "2", "2.1"]
        );
        assert_eq!(
            labels(&options, &[1, 2, 3, 3, 2, 3]),
            vec!["1", "1.1", "1.1.1", "1.1.2", "1.2", "1.2.1"]
        );
    }

    #[test]
    fn test_out_of_range_levels_do_not_mutate() {
        let options = DecoratorOptions::default();
        let mut counter = Counter::new(&options);
        assert_eq!(counter.decorate(1, None), "1");
        assert_eq!(counter.decorate(0, None), "");
        assert_eq!(counter.decorate(7, None), "");
        assert_eq!(counter.decorate(usize::MAX, None), "");
        assert_eq!(counter.decorate(2, None), "1.1");
        assert_eq!(counter.decorate(1, None), "2");
    }

    #[test]
    fn test_ignore_top_level() {
        let options = DecoratorOptions {
            ignore_top_level: 1,
            ..DecoratorOptions::default()
        };
        assert_eq!(
            labels(&options, &[1, 2, 3, 2, 1, 2]),
            vec!["", "1", "1.1", "2", "", "1"]
        );

        let deeper = DecoratorOptions {
            ignore_top_level: 2,
            ..DecoratorOptions::default()
        };
        assert_eq!(labels(&deeper, &[1, 2, 3, 3]), vec!["", "", "1", "2"]);
    }

    #[test]
    fn test_ignore_top_level_first_entry_starts_at_one() {
        let options = DecoratorOptions {
            ignore_top_level: 2,
            ..DecoratorOptions::default()
        };
        assert_eq!(labels(&options, &[3]), vec!["1"]);
        assert_eq!(labels(&options, &[1, 3, 4]), vec!["", "1", "1.1"]);
    }

    #[test]
    fn test_zero_level_policy() {
        let zero = DecoratorOptions {
            allow_zero_level: true,
            ..DecoratorOptions::default()
        };
        assert_eq!(labels(&zero, &[3]), vec!["0.0.1"]);
        assert_eq!(labels(&zero, &[2, 1, 2]), vec!["0.1", "1", "1.1"]);

        let implicit = DecoratorOptions::default();
        assert_eq!(labels(&implicit, &[3]), vec!["1.1.1"]);
        assert_eq!(labels(&implicit, &[1, 3, 2]), vec!["1", "1.1.1", "1.2"]);
    }

    #[test]
    fn test_max_rec_level_ceiling() {
        let options = DecoratorOptions {
            max_rec_level: 2,
            ..DecoratorOptions::default()
        };
        assert_eq!(
            labels(&options, &[1, 2, 3, 3, 2, 4, 1]),
            vec!["1", "1.1", "", "", "1.2", "", "2"]
        );
    }

    #[test]
    fn test_alphabetic_and_roman_styles() {
        let alpha = DecoratorOptions::ordered(StyleType::LowerAlpha);
        assert_eq!(labels(&alpha, &[1, 2, 2, 1]), vec!["a", "a.a", "a.b", "b"]);

        let roman = DecoratorOptions::ordered(StyleType::UpperRoman);
        let many: Vec<usize> = std::iter::repeat_n(1, 4).collect();
        assert_eq!(labels(&roman, &many), vec!["I", "II", "III", "IV"]);
    }

    #[test]
    fn test_alphabetic_zero_fill_renders_decimal_zero() {
        let options = DecoratorOptions {
            allow_zero_level: true,
            ..DecoratorOptions::ordered(StyleType::UpperAlpha)
        };
        assert_eq!(labels(&options, &[2]), vec!["0.A"]);
    }

    #[test]
    fn test_custom_ident_style() {
        let options = DecoratorOptions {
            custom_idents: parse_custom_idents("Ⓐ Ⓑ"),
            ..DecoratorOptions::ordered(StyleType::CustomIdent)
        };
        assert_eq!(
            labels(&options, &[1, 1, 1, 2]),
            vec!["Ⓐ", "Ⓑ", "3", "3.Ⓐ"]
        );
    }

    #[test]
    fn test_specified_string_style() {
        let options = DecoratorOptions {
            specified_string: " § ".to_string(),
            delimiter: String::new(),
            ..DecoratorOptions::ordered(StyleType::Specified)
        };
        assert_eq!(labels(&options, &[1, 2, 3]), vec!["§", "§§", "§§§"]);

        let blank = DecoratorOptions {
            specified_string: String::new(),
            ..DecoratorOptions::ordered(StyleType::Specified)
        };
        assert_eq!(labels(&blank, &[1, 2]), vec!["#", "#.#"]);
    }

    #[test]
    fn test_leading_and_trailing_delimiters() {
        let options = DecoratorOptions {
            delimiter: "-".to_string(),
            leading_delimiter: true,
            trailing_delimiter: true,
            ..DecoratorOptions::default()
        };
        assert_eq!(labels(&options, &[1, 2]), vec!["-1-", "-1-1-"]);

        let custom = DecoratorOptions {
            leading_delimiter: true,
            custom_leading_delimiter: "§".to_string(),
            trailing_delimiter: true,
            custom_trailing_delimiter: ")".to_string(),
            ..DecoratorOptions::default()
        };
        assert_eq!(labels(&custom, &[1, 2]), vec!["§1)", "§1.1)"]);
    }

    #[test]
    fn test_suppressed_labels_skip_delimiters() {
        let options = DecoratorOptions {
            ignore_top_level: 1,
            trailing_delimiter: true,
            ..DecoratorOptions::default()
        };
        assert_eq!(labels(&options, &[1, 2]), vec!["", "1."]);
    }

    #[test]
    fn test_unordered_mode() {
        let options = DecoratorOptions {
            max_rec_level: 4,
            ..DecoratorOptions::unordered(std::array::from_fn(|idx| format!("L{}", idx + 1)))
        };
        assert_eq!(
            labels(&options, &[1, 2, 2, 5, 0, 7, 4]),
            vec!["L1", "L2", "L2", "", "", "", "L4"]
        );
    }

    #[test]
    fn test_unordered_ignores_suppression() {
        let options = DecoratorOptions {
            ignore_top_level: 3,
            ..DecoratorOptions::unordered(crate::decorator::default_level_headings())
        };
        assert_eq!(labels(&options, &[1, 3]), vec!["H1", "H3"]);
    }

    #[test]
    fn test_position_spacing() {
        let options = DecoratorOptions::default();
        let mut counter = Counter::new(&options);
        assert_eq!(counter.decorate(1, Some(Position::Before)), "1 ");
        assert_eq!(counter.decorate(2, Some(Position::After)), " 1.1");
        assert_eq!(counter.decorate(2, Some(Position::BeforeInside)), "1.2");
        assert_eq!(counter.decorate(9, Some(Position::Before)), "");
    }
}
