//! Form state for adding friends and splitting bills.
//!
//! Fields hold raw text exactly as typed. Numbers are parsed once, at
//! submit time; the only check applied while typing is the clamp that
//! keeps the user's expense from exceeding the bill.

use tracing::warn;

use crate::error::{FormError, LedgerError};
use crate::ledger::{Ledger, DEFAULT_IMAGE_URL};
use crate::types::{FriendId, Payer};

// ============================================================================
// ADD FRIEND
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFriendForm {
    pub name: String,
    pub image: String,
    default_image: String,
}

impl Default for AddFriendForm {
    fn default() -> Self {
        AddFriendForm::new(DEFAULT_IMAGE_URL)
    }
}

impl AddFriendForm {
    /// Empty name, image prefilled with `default_image`.
    pub fn new(default_image: impl Into<String>) -> Self {
        let default_image = default_image.into();
        AddFriendForm {
            name: String::new(),
            image: default_image.clone(),
            default_image,
        }
    }

    /// Add the friend to `ledger`. On success the fields reset; on failure
    /// they are kept so the user can correct them.
    pub fn submit(&mut self, ledger: &mut Ledger) -> Result<FriendId, LedgerError> {
        let id = ledger.add_friend(&self.name, &self.image)?;
        self.reset();
        Ok(id)
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.image = self.default_image.clone();
    }
}

// ============================================================================
// SPLIT BILL
// ============================================================================

/// Change to the friend's balance for a bill.
///
/// When the user pays, the friend owes their share (`bill - paid`). When
/// the friend pays, the user owes what they did not cover themselves.
pub fn split_delta(bill: f64, paid_by_user: f64, payer: Payer) -> f64 {
    match payer {
        Payer::User => bill - paid_by_user,
        Payer::Friend => -paid_by_user,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitBillForm {
    bill_value: String,
    paid_by_user: String,
    payer: Payer,
}

impl SplitBillForm {
    /// Build a form from complete inputs, as a non-interactive caller
    /// would. The bill is entered first, so an expense the clamp refuses
    /// is reported against whichever field is actually wrong.
    pub fn from_inputs(bill: &str, paid: &str, payer: Payer) -> Result<Self, FormError> {
        let mut form = SplitBillForm {
            payer,
            ..SplitBillForm::default()
        };
        form.set_bill_value(bill);
        if !form.set_paid_by_user(paid) {
            if bill.trim().is_empty() {
                return Err(FormError::MissingFields);
            }
            let bill = required_amount("Bill value", bill)?;
            let paid = parse_amount(paid).unwrap_or_default();
            return Err(FormError::PaidExceedsBill { paid, bill });
        }
        Ok(form)
    }

    pub fn bill_value(&self) -> &str {
        &self.bill_value
    }

    pub fn paid_by_user(&self) -> &str {
        &self.paid_by_user
    }

    pub fn payer(&self) -> Payer {
        self.payer
    }

    pub fn set_bill_value(&mut self, input: impl Into<String>) {
        self.bill_value = input.into();
    }

    /// Set the user's expense. Returns false, keeping the previous value,
    /// when the new value would exceed the current bill. An empty or
    /// unparseable bill counts as zero.
    pub fn set_paid_by_user(&mut self, input: impl Into<String>) -> bool {
        let input = input.into();
        let bill = parse_amount(&self.bill_value).unwrap_or(0.0);
        if parse_amount(&input).is_some_and(|paid| paid > bill) {
            return false;
        }
        self.paid_by_user = input;
        true
    }

    pub fn set_payer(&mut self, payer: Payer) {
        self.payer = payer;
    }

    pub fn toggle_payer(&mut self) {
        self.payer = self.payer.toggled();
    }

    /// The friend's share, shown read-only. None while the bill is blank.
    pub fn friend_expense(&self) -> Option<f64> {
        let bill = parse_amount(&self.bill_value)?;
        Some(bill - parse_amount(&self.paid_by_user).unwrap_or(0.0))
    }

    /// Parse and check both amounts, returning `(bill, paid_by_user)`.
    pub fn validate(&self) -> Result<(f64, f64), FormError> {
        if self.bill_value.trim().is_empty() || self.paid_by_user.trim().is_empty() {
            return Err(FormError::MissingFields);
        }
        let bill = required_amount("Bill value", &self.bill_value)?;
        let paid = required_amount("Your expense", &self.paid_by_user)?;
        if bill == 0.0 || paid == 0.0 {
            return Err(FormError::MissingFields);
        }
        if paid > bill {
            return Err(FormError::PaidExceedsBill { paid, bill });
        }
        Ok((bill, paid))
    }

    /// Balance change for the selected friend.
    pub fn delta(&self) -> Result<f64, FormError> {
        let (bill, paid) = self.validate()?;
        Ok(split_delta(bill, paid, self.payer))
    }

    /// Apply this bill to the ledger's selected friend.
    pub fn submit(&self, ledger: &mut Ledger) -> Result<f64, LedgerError> {
        let delta = self.delta().inspect_err(|e| warn!(error = %e, "split rejected"))?;
        ledger.split_bill(delta)?;
        Ok(delta)
    }
}

/// Select the friend called `name` and apply one bill to them.
/// Returns the balance change.
pub fn split_with_friend(
    ledger: &mut Ledger,
    name: &str,
    bill: &str,
    paid: &str,
    payer: Payer,
) -> Result<f64, LedgerError> {
    let id = ledger
        .find_by_name(name)
        .map(|f| f.id.clone())
        .ok_or_else(|| LedgerError::NoFriendNamed(name.to_string()))?;
    let form = SplitBillForm::from_inputs(bill, paid, payer)?;

    if ledger.selected_friend_id() != Some(&id) {
        ledger.select_friend(&id)?;
    }
    form.submit(ledger)
}

/// Parse a finite, non-negative amount. Surrounding whitespace is ignored.
pub fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

fn required_amount(field: &'static str, input: &str) -> Result<f64, FormError> {
    parse_amount(input).ok_or_else(|| FormError::InvalidAmount {
        field,
        input: input.to_string(),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(bill: &str, paid: &str, payer: Payer) -> SplitBillForm {
        let mut form = SplitBillForm::default();
        form.set_bill_value(bill);
        assert!(form.set_paid_by_user(paid));
        form.set_payer(payer);
        form
    }

    // -- delta --

    #[test]
    fn user_paying_charges_friend_their_share() {
        assert_eq!(split_delta(100.0, 40.0, Payer::User), 60.0);
    }

    #[test]
    fn friend_paying_credits_users_share() {
        assert_eq!(split_delta(100.0, 40.0, Payer::Friend), -40.0);
    }

    #[test]
    fn form_delta_follows_payer() {
        assert_eq!(filled("100", "40", Payer::User).delta(), Ok(60.0));
        assert_eq!(filled("100", "40", Payer::Friend).delta(), Ok(-40.0));
    }

    // -- clamping --

    #[test]
    fn paid_above_bill_is_ignored() {
        let mut form = filled("50", "20", Payer::User);
        assert!(!form.set_paid_by_user("51"));
        assert_eq!(form.paid_by_user(), "20");
    }

    #[test]
    fn paid_equal_to_bill_is_accepted() {
        let mut form = filled("50", "20", Payer::User);
        assert!(form.set_paid_by_user("50"));
        assert_eq!(form.paid_by_user(), "50");
    }

    #[test]
    fn paid_is_rejected_while_bill_is_blank() {
        let mut form = SplitBillForm::default();
        assert!(!form.set_paid_by_user("5"));
        assert_eq!(form.paid_by_user(), "");
    }

    #[test]
    fn non_numeric_paid_text_is_kept_until_submit() {
        let mut form = filled("50", "20", Payer::User);
        assert!(form.set_paid_by_user("2x"));
        assert_eq!(
            form.validate(),
            Err(FormError::InvalidAmount {
                field: "Your expense",
                input: "2x".into()
            })
        );
    }

    #[test]
    fn lowering_bill_below_paid_is_caught_at_submit() {
        let mut form = filled("50", "40", Payer::User);
        form.set_bill_value("30");
        assert_eq!(
            form.validate(),
            Err(FormError::PaidExceedsBill { paid: 40.0, bill: 30.0 })
        );
    }

    // -- validation --

    #[test]
    fn missing_fields_are_rejected() {
        let mut form = SplitBillForm::default();
        assert_eq!(form.validate(), Err(FormError::MissingFields));
        form.set_bill_value("100");
        assert_eq!(form.validate(), Err(FormError::MissingFields));
    }

    #[test]
    fn zero_amounts_count_as_missing() {
        assert_eq!(filled("100", "0", Payer::User).validate(), Err(FormError::MissingFields));
    }

    #[test]
    fn negative_bill_is_invalid() {
        let mut form = SplitBillForm::default();
        form.set_bill_value("-10");
        form.paid_by_user = "1".into();
        assert!(matches!(
            form.validate(),
            Err(FormError::InvalidAmount { field: "Bill value", .. })
        ));
    }

    #[test]
    fn non_finite_amounts_are_invalid() {
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount(" 12.5 "), Some(12.5));
    }

    // -- derived friend expense --

    #[test]
    fn friend_expense_is_blank_without_bill() {
        assert_eq!(SplitBillForm::default().friend_expense(), None);
    }

    #[test]
    fn friend_expense_is_bill_minus_paid() {
        assert_eq!(filled("100", "40", Payer::User).friend_expense(), Some(60.0));
        let mut form = SplitBillForm::default();
        form.set_bill_value("100");
        assert_eq!(form.friend_expense(), Some(100.0));
    }

    // -- submission --

    #[test]
    fn failed_split_leaves_ledger_untouched() {
        let mut ledger = Ledger::with_sample_friends();
        ledger.select_friend(&FriendId::from("933372")).unwrap();
        let before = ledger.clone();

        let result = SplitBillForm::default().submit(&mut ledger);

        assert_eq!(result, Err(LedgerError::Form(FormError::MissingFields)));
        assert_eq!(ledger, before);
    }

    #[test]
    fn add_form_resets_after_success() {
        let mut ledger = Ledger::default();
        let mut form = AddFriendForm::new("https://img.test/48");
        form.name = "Dana".into();
        form.submit(&mut ledger).unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(form.name, "");
        assert_eq!(form.image, "https://img.test/48");
    }

    #[test]
    fn add_form_keeps_input_after_failure() {
        let mut ledger = Ledger::default();
        let mut form = AddFriendForm::default();
        form.image = "https://img.test/custom".into();

        assert!(form.submit(&mut ledger).is_err());
        assert_eq!(form.image, "https://img.test/custom");
        assert!(ledger.is_empty());
    }

    // -- named split --

    fn sarah_balance(ledger: &Ledger) -> f64 {
        ledger.friend(&FriendId::from("933372")).unwrap().balance
    }

    #[test]
    fn non_numeric_bill_is_reported_as_invalid_bill() {
        let mut ledger = Ledger::with_sample_friends();
        let before = ledger.clone();

        let result = split_with_friend(&mut ledger, "sarah", "abc", "5", Payer::User);

        assert_eq!(
            result,
            Err(LedgerError::Form(FormError::InvalidAmount {
                field: "Bill value",
                input: "abc".into()
            }))
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn expense_above_bill_is_reported_as_exceeding() {
        let mut ledger = Ledger::with_sample_friends();
        let result = split_with_friend(&mut ledger, "Sarah", "30", "40", Payer::User);

        assert_eq!(
            result,
            Err(LedgerError::Form(FormError::PaidExceedsBill { paid: 40.0, bill: 30.0 }))
        );
        assert_eq!(sarah_balance(&ledger), 20.0);
        assert!(ledger.selected_friend().is_none());
    }

    #[test]
    fn blank_bill_is_reported_as_missing() {
        assert_eq!(
            SplitBillForm::from_inputs("", "5", Payer::User),
            Err(FormError::MissingFields)
        );
    }

    #[test]
    fn named_split_applies_delta() {
        let mut ledger = Ledger::with_sample_friends();
        let delta = split_with_friend(&mut ledger, "SARAH", "100", "40", Payer::User).unwrap();

        assert_eq!(delta, 60.0);
        assert_eq!(sarah_balance(&ledger), 80.0);
    }

    #[test]
    fn named_split_keeps_existing_selection() {
        let mut ledger = Ledger::with_sample_friends();
        ledger.select_friend(&FriendId::from("933372")).unwrap();
        split_with_friend(&mut ledger, "Sarah", "100", "40", Payer::Friend).unwrap();

        assert_eq!(sarah_balance(&ledger), -20.0);
        assert_eq!(ledger.selected_friend_id(), Some(&FriendId::from("933372")));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let mut ledger = Ledger::with_sample_friends();
        assert_eq!(
            split_with_friend(&mut ledger, "Zed", "100", "40", Payer::User),
            Err(LedgerError::NoFriendNamed("Zed".into()))
        );
    }
}
