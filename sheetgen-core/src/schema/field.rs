//! Field rules: how each column of a schema gets its value from the row index

use super::FieldValue;
use chrono::NaiveDate;
use rand::Rng;

/// Name and value rule of a single column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rule: FieldRule,
}

impl FieldSpec {
    pub const fn new(name: &'static str, rule: FieldRule) -> Self {
        Self { name, rule }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRule {
    /// `prefix` followed by the index (or `index % modulus`) zero-padded to `width`
    Sequence {
        prefix: &'static str,
        width: usize,
        modulus: Option<u64>,
    },
    /// `prefix`, the index, then `suffix`
    Indexed {
        prefix: &'static str,
        suffix: &'static str,
    },
    /// `prefix` followed by `index % modulus + offset`
    Bucket {
        prefix: &'static str,
        modulus: u64,
        offset: u64,
    },
    /// `values[index % values.len()]`
    Cycle(&'static [&'static str]),
    /// `Product <letter><index % 1000>`
    ProductCode,
    /// Uniform integer in `min..max`
    RandomInt { min: i64, max: i64 },
    /// `010-dddd-dddd` with random digit groups
    Phone,
    /// Calendar date derived from the index.
    ///
    /// Year is `base_year + index % year_span`, month `index % 12 + 1`,
    /// day `index % 28 + 1`. With `as_text` the value is an ISO `YYYY-MM-DD`
    /// string instead of a date cell.
    Date {
        base_year: i32,
        year_span: u64,
        as_text: bool,
    },
    /// Product of two integer fields of the same record.
    ///
    /// Evaluates to a zero placeholder; the record builder fills it in once
    /// every other field exists.
    Product(&'static str, &'static str),
}

impl FieldRule {
    /// Whether the value draws from the random source
    pub fn is_random(&self) -> bool {
        matches!(self, FieldRule::RandomInt { .. } | FieldRule::Phone)
    }

    /// Whether the value depends on other fields of the record
    pub fn is_computed(&self) -> bool {
        matches!(self, FieldRule::Product(..))
    }

    pub fn evaluate<R: Rng + ?Sized>(&self, index: u64, rng: &mut R) -> FieldValue {
        match *self {
            FieldRule::Sequence {
                prefix,
                width,
                modulus,
            } => {
                let n = modulus.map_or(index, |m| index % m);
                FieldValue::Text(format!("{}{:0width$}", prefix, n, width = width))
            }
            FieldRule::Indexed { prefix, suffix } => {
                FieldValue::Text(format!("{}{}{}", prefix, index, suffix))
            }
            FieldRule::Bucket {
                prefix,
                modulus,
                offset,
            } => FieldValue::Text(format!("{}{}", prefix, index % modulus + offset)),
            FieldRule::Cycle(values) => {
                let pick = values[(index % values.len() as u64) as usize];
                FieldValue::Text(pick.to_string())
            }
            FieldRule::ProductCode => {
                let letter = (b'A' + (index % 26) as u8) as char;
                FieldValue::Text(format!("Product {}{}", letter, index % 1000))
            }
            FieldRule::RandomInt { min, max } => FieldValue::Integer(rng.gen_range(min..max)),
            FieldRule::Phone => {
                let first: u32 = rng.gen_range(0..10_000);
                let second: u32 = rng.gen_range(0..10_000);
                FieldValue::Text(format!("010-{:04}-{:04}", first, second))
            }
            FieldRule::Date {
                base_year,
                year_span,
                as_text,
            } => {
                let date = index_date(index, base_year, year_span);
                if as_text {
                    FieldValue::Text(date.format("%Y-%m-%d").to_string())
                } else {
                    FieldValue::Date(date)
                }
            }
            FieldRule::Product(..) => FieldValue::Integer(0),
        }
    }
}

fn index_date(index: u64, base_year: i32, year_span: u64) -> NaiveDate {
    let year = base_year + (index % year_span.max(1)) as i32;
    let month = (index % 12) as u32 + 1;
    let day = (index % 28) as u32 + 1;
    // Day never exceeds 28, so every month accepts it
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn text(value: FieldValue) -> String {
        match value {
            FieldValue::Text(s) => s,
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_sequence_padding() {
        let mut rng = StdRng::seed_from_u64(1);
        let rule = FieldRule::Sequence {
            prefix: "EMP",
            width: 6,
            modulus: None,
        };
        assert_eq!(text(rule.evaluate(42, &mut rng)), "EMP000042");
        assert_eq!(text(rule.evaluate(1_234_567, &mut rng)), "EMP1234567");

        let wrapped = FieldRule::Sequence {
            prefix: "ACC",
            width: 6,
            modulus: Some(10_000),
        };
        assert_eq!(text(wrapped.evaluate(123_456, &mut rng)), "ACC003456");
    }

    #[test]
    fn test_product_code() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(text(FieldRule::ProductCode.evaluate(1, &mut rng)), "Product B1");
        assert_eq!(text(FieldRule::ProductCode.evaluate(26, &mut rng)), "Product A26");
        assert_eq!(text(FieldRule::ProductCode.evaluate(2025, &mut rng)), "Product X25");
    }

    #[test]
    fn test_index_dates() {
        let mut rng = StdRng::seed_from_u64(1);
        let hire = FieldRule::Date {
            base_year: 2020,
            year_span: 4,
            as_text: true,
        };
        assert_eq!(text(hire.evaluate(1, &mut rng)), "2021-02-02");
        assert_eq!(text(hire.evaluate(27, &mut rng)), "2023-04-28");
        assert_eq!(text(hire.evaluate(28, &mut rng)), "2020-05-01");

        let booked = FieldRule::Date {
            base_year: 2024,
            year_span: 1,
            as_text: false,
        };
        assert_eq!(
            booked.evaluate(13, &mut rng),
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap())
        );
    }

    #[test]
    fn test_random_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let rule = FieldRule::RandomInt { min: 1, max: 51 };
        for i in 0..2000 {
            match rule.evaluate(i, &mut rng) {
                FieldValue::Integer(n) => assert!((1..=50).contains(&n)),
                other => panic!("unexpected {:?}", other),
            }
        }

        for i in 0..200 {
            let phone = text(FieldRule::Phone.evaluate(i, &mut rng));
            assert_eq!(phone.len(), 13);
            assert!(phone.starts_with("010-"));
            assert_eq!(&phone[8..9], "-");
            assert!(phone[4..8].chars().all(|c| c.is_ascii_digit()));
            assert!(phone[9..].chars().all(|c| c.is_ascii_digit()));
        }
    }
}
