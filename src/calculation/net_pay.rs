//! Net pay calculation.

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};
use crate::models::EmployeeRecord;

/// Calculates net pay for an employee.
///
/// Net pay is basic salary plus allowances minus deductions. The result is
/// exact; rounding only happens when the amount is displayed. Negative
/// components are taken as given.
///
/// Returns a `Calculation` error if the result does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use payslip_dispatch::calculation::net_pay;
/// use payslip_dispatch::models::EmployeeRecord;
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
/// assert_eq!(net_pay(&record)?, Decimal::from_str("975.5").unwrap());
/// # Ok::<(), payslip_dispatch::error::PayrollError>(())
/// ```
pub fn net_pay(record: &EmployeeRecord) -> PayrollResult<Decimal> {
    record
        .basic_salary
        .checked_add(record.allowances)
        .and_then(|gross| gross.checked_sub(record.deductions))
        .ok_or_else(|| PayrollError::Calculation {
            employee_id: record.employee_id.clone(),
            message: "net pay is out of range".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_record(basic: Decimal, allowances: Decimal, deductions: Decimal) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: "E001".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            basic_salary: basic,
            allowances,
            deductions,
        }
    }

    #[test]
    fn test_net_pay_adds_allowances_and_subtracts_deductions() {
        let record = create_test_record(dec("1000"), dec("50.5"), dec("75"));
        assert_eq!(net_pay(&record).unwrap(), dec("975.5"));
    }

    #[test]
    fn test_net_pay_keeps_full_precision() {
        let record = create_test_record(dec("1000.125"), dec("0.001"), dec("0.0005"));
        assert_eq!(net_pay(&record).unwrap(), dec("1000.1255"));
    }

    #[test]
    fn test_net_pay_with_zero_components() {
        let record = create_test_record(dec("2500"), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(net_pay(&record).unwrap(), dec("2500"));
    }

    #[test]
    fn test_net_pay_can_be_negative() {
        let record = create_test_record(dec("100"), dec("0"), dec("150.75"));
        assert_eq!(net_pay(&record).unwrap(), dec("-50.75"));
    }

    #[test]
    fn test_negative_components_pass_through() {
        let record = create_test_record(dec("1000"), dec("-20"), dec("-5"));
        assert_eq!(net_pay(&record).unwrap(), dec("985"));
    }

    #[test]
    fn test_net_pay_overflow_is_an_error() {
        let record = create_test_record(Decimal::MAX, dec("1"), Decimal::ZERO);

        match net_pay(&record) {
            Err(PayrollError::Calculation { employee_id, .. }) => {
                assert_eq!(employee_id, "E001");
            }
            other => panic!("Expected Calculation error, got {:?}", other),
        }
    }

    #[test]
    fn test_net_pay_underflow_is_an_error() {
        let record = create_test_record(Decimal::MIN, Decimal::ZERO, dec("1"));
        assert!(net_pay(&record).is_err());
    }

    #[test]
    fn test_large_gross_within_range_after_deductions() {
        let record = create_test_record(Decimal::MAX, Decimal::ZERO, dec("1"));
        assert_eq!(net_pay(&record).unwrap(), Decimal::MAX - dec("1"));
    }

    proptest! {
        #[test]
        fn prop_net_pay_matches_component_sum(
            basic in 0i64..10_000_000,
            allowances in 0i64..1_000_000,
            deductions in 0i64..1_000_000,
            scale in 0u32..4,
        ) {
            let basic = Decimal::new(basic, scale);
            let allowances = Decimal::new(allowances, scale);
            let deductions = Decimal::new(deductions, 2);
            let record = create_test_record(basic, allowances, deductions);

            let net = net_pay(&record).unwrap();

            prop_assert_eq!(net, basic + allowances - deductions);
            prop_assert_eq!(net + deductions - allowances, basic);
        }
    }
}
