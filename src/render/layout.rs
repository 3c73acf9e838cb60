//! Payslip layout.
//!
//! A [`PayslipLayout`] is the ordered content of one payslip page, built
//! from an employee record before anything is painted.

use crate::calculation::{format_amount, net_pay};
use crate::error::PayrollResult;
use crate::models::EmployeeRecord;

/// Section heading above the amount rows.
pub const SALARY_DETAILS_HEADING: &str = "Salary Details";

/// One element of the payslip page, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutLine {
    /// Centered bold title.
    Title(String),
    /// Plain left-aligned text.
    Text(String),
    /// Bold left-aligned section heading.
    Heading(String),
    /// Vertical whitespace, in millimetres.
    Gap(u16),
    /// Bordered label/amount row.
    Row {
        /// Left cell text.
        label: String,
        /// Right cell text, already formatted.
        value: String,
        /// Whether the row is printed in bold.
        emphasis: bool,
    },
}

/// The content of a single-page payslip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslipLayout {
    /// Page content in reading order.
    pub lines: Vec<LayoutLine>,
}

impl PayslipLayout {
    /// Builds the payslip for `record`.
    ///
    /// Fails only if the net pay cannot be calculated.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_dispatch::models::EmployeeRecord;
    /// use payslip_dispatch::render::PayslipLayout;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let record = EmployeeRecord {
    ///     employee_id: "E001".to_string(),
    ///     name: "Jane Doe".to_string(),
    ///     email: "jane@example.com".to_string(),
    ///     basic_salary: Decimal::from_str("1000").unwrap(),
    ///     allowances: Decimal::from_str("50.5").unwrap(),
    ///     deductions: Decimal::from_str("75").unwrap(),
    /// };
    ///
    /// let layout = PayslipLayout::build(&record, "$", "Uncommon.org")?;
    /// assert_eq!(layout.title(), Some("Uncommon.org Payslip"));
    /// assert!(layout.rows().any(|(label, value)| label == "Net Salary:" && value == "$ 975.50"));
    /// # Ok::<(), payslip_dispatch::error::PayrollError>(())
    /// ```
    pub fn build(
        record: &EmployeeRecord,
        currency_symbol: &str,
        organization: &str,
    ) -> PayrollResult<Self> {
        let net = net_pay(record)?;
        let row = |label: &str, amount, emphasis| LayoutLine::Row {
            label: label.to_string(),
            value: format_amount(currency_symbol, amount),
            emphasis,
        };

        let lines = vec![
            LayoutLine::Title(format!("{} Payslip", organization)),
            LayoutLine::Gap(10),
            LayoutLine::Text(format!("Employee ID: {}", record.employee_id)),
            LayoutLine::Text(format!("Name: {}", record.name)),
            LayoutLine::Gap(5),
            LayoutLine::Heading(SALARY_DETAILS_HEADING.to_string()),
            row("Basic Salary:", record.basic_salary, false),
            row("Allowances:", record.allowances, false),
            row("Deductions:", record.deductions, false),
            row("Net Salary:", net, true),
        ];

        Ok(Self { lines })
    }

    /// Returns the title text, if any.
    pub fn title(&self) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            LayoutLine::Title(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Iterates over every piece of text on the page, top to bottom.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().flat_map(|line| {
            let (first, second) = match line {
                LayoutLine::Title(text) | LayoutLine::Text(text) | LayoutLine::Heading(text) => {
                    (Some(text.as_str()), None)
                }
                LayoutLine::Gap(_) => (None, None),
                LayoutLine::Row { label, value, .. } => {
                    (Some(label.as_str()), Some(value.as_str()))
                }
            };
            first.into_iter().chain(second)
        })
    }

    /// Iterates over the bordered rows as `(label, value)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|line| match line {
            LayoutLine::Row { label, value, .. } => Some((label.as_str(), value.as_str())),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayrollError;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_record() -> EmployeeRecord {
        EmployeeRecord {
            employee_id: "E001".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            basic_salary: dec("1000"),
            allowances: dec("50.5"),
            deductions: dec("75"),
        }
    }

    #[test]
    fn test_layout_order() {
        let layout = PayslipLayout::build(&create_test_record(), "$", "Uncommon.org").unwrap();

        assert_eq!(
            layout.lines,
            vec![
                LayoutLine::Title("Uncommon.org Payslip".to_string()),
                LayoutLine::Gap(10),
                LayoutLine::Text("Employee ID: E001".to_string()),
                LayoutLine::Text("Name: Jane Doe".to_string()),
                LayoutLine::Gap(5),
                LayoutLine::Heading("Salary Details".to_string()),
                LayoutLine::Row {
                    label: "Basic Salary:".to_string(),
                    value: "$ 1000.00".to_string(),
                    emphasis: false,
                },
                LayoutLine::Row {
                    label: "Allowances:".to_string(),
                    value: "$ 50.50".to_string(),
                    emphasis: false,
                },
                LayoutLine::Row {
                    label: "Deductions:".to_string(),
                    value: "$ 75.00".to_string(),
                    emphasis: false,
                },
                LayoutLine::Row {
                    label: "Net Salary:".to_string(),
                    value: "$ 975.50".to_string(),
                    emphasis: true,
                },
            ]
        );
    }

    #[test]
    fn test_rows_use_currency_symbol() {
        let layout = PayslipLayout::build(&create_test_record(), "KES", "Uncommon.org").unwrap();

        let values: Vec<&str> = layout.rows().map(|(_, value)| value).collect();
        assert_eq!(values, vec!["KES 1000.00", "KES 50.50", "KES 75.00", "KES 975.50"]);
    }

    #[test]
    fn test_net_row_rounds_only_for_display() {
        let mut record = create_test_record();
        record.basic_salary = dec("1000.004");
        record.allowances = dec("0.002");
        record.deductions = dec("0");

        let layout = PayslipLayout::build(&record, "$", "Uncommon.org").unwrap();

        let net = layout.rows().last().unwrap();
        assert_eq!(net, ("Net Salary:", "$ 1000.01"));
    }

    #[test]
    fn test_texts_cover_every_line() {
        let layout = PayslipLayout::build(&create_test_record(), "$", "Uncommon.org").unwrap();

        let texts: Vec<&str> = layout.texts().collect();
        assert_eq!(texts.len(), 12);
        assert_eq!(texts[0], "Uncommon.org Payslip");
        assert_eq!(texts[2], "Name: Jane Doe");
        assert_eq!(texts[11], "$ 975.50");
    }

    #[test]
    fn test_build_fails_when_net_pay_overflows() {
        let mut record = create_test_record();
        record.basic_salary = Decimal::MAX;

        let result = PayslipLayout::build(&record, "$", "Uncommon.org");

        assert!(matches!(result, Err(PayrollError::Calculation { .. })));
    }

    #[test]
    fn test_title_uses_organization() {
        let layout = PayslipLayout::build(&create_test_record(), "$", "Example Ltd").unwrap();
        assert_eq!(layout.title(), Some("Example Ltd Payslip"));
    }
}
