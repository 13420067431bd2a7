//! The ledger state machine: friends, balances and the panel mode.
//!
//! `Ledger` is the single owner of the friend list. Views borrow it;
//! only the operations below mutate it, and each one either applies
//! completely or leaves the ledger untouched.
//!
//! Panel visibility is one explicit `Mode` instead of two independent
//! flags. The add-friend form may be opened on top of a selection
//! (`AddingFriend { behind: Some(id) }`); the selection survives and the
//! split-bill panel stays live until the friend is deselected.

use tracing::{debug, info, warn};

use crate::error::{FormError, LedgerError};
use crate::types::{Friend, FriendId};

/// Avatar service used by the built-in roster and the add-friend form.
pub const DEFAULT_IMAGE_URL: &str = "https://i.pravatar.cc/48";

// ============================================================================
// MODE
// ============================================================================

/// Which side panels are showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Only the friend list.
    #[default]
    Idle,
    /// Add-friend form open. `behind` is a selection that was active when
    /// the form was opened and is restored when it closes.
    AddingFriend { behind: Option<FriendId> },
    /// A friend is selected; the split-bill form targets them.
    SplittingBill(FriendId),
}

impl Mode {
    /// The selected friend, if any, regardless of whether the add form
    /// is also open.
    pub fn selection(&self) -> Option<&FriendId> {
        match self {
            Mode::Idle => None,
            Mode::AddingFriend { behind } => behind.as_ref(),
            Mode::SplittingBill(id) => Some(id),
        }
    }

    pub fn is_adding(&self) -> bool {
        matches!(self, Mode::AddingFriend { .. })
    }

    /// Mode after the add form closes.
    fn closing_add_form(self) -> Mode {
        match self {
            Mode::AddingFriend { behind: Some(id) } => Mode::SplittingBill(id),
            Mode::AddingFriend { behind: None } => Mode::Idle,
            other => other,
        }
    }
}

// ============================================================================
// LEDGER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ledger {
    friends: Vec<Friend>,
    mode: Mode,
}

impl Ledger {
    /// Create a ledger over an existing roster, with no panel open.
    pub fn new(friends: Vec<Friend>) -> Self {
        Ledger {
            friends,
            mode: Mode::Idle,
        }
    }

    /// The roster the app starts with when no config overrides it.
    pub fn with_sample_friends() -> Self {
        Ledger::new(sample_friends())
    }

    // -- accessors --

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn friend(&self, id: &FriendId) -> Option<&Friend> {
        self.friends.iter().find(|f| &f.id == id)
    }

    /// First friend whose name matches, ignoring ASCII case.
    pub fn find_by_name(&self, name: &str) -> Option<&Friend> {
        self.friends.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_add_form_open(&self) -> bool {
        self.mode.is_adding()
    }

    pub fn selected_friend_id(&self) -> Option<&FriendId> {
        self.mode.selection()
    }

    pub fn selected_friend(&self) -> Option<&Friend> {
        self.selected_friend_id().and_then(|id| self.friend(id))
    }

    // -- operations --

    /// Open or close the add-friend form. Never touches the selection.
    pub fn toggle_add_friend_form(&mut self) {
        let mode = std::mem::take(&mut self.mode);
        self.mode = match mode {
            Mode::Idle => Mode::AddingFriend { behind: None },
            Mode::SplittingBill(id) => Mode::AddingFriend { behind: Some(id) },
            adding @ Mode::AddingFriend { .. } => adding.closing_add_form(),
        };
        debug!(mode = ?self.mode, "toggled add-friend form");
    }

    /// Append a friend with a zero balance and close the add-friend form.
    ///
    /// The avatar URL gets a `u=<id>` query parameter so that friends
    /// sharing the default URL still resolve to distinct avatars.
    pub fn add_friend(&mut self, name: &str, image: &str) -> Result<FriendId, LedgerError> {
        let name = name.trim();
        let image = image.trim();
        if name.is_empty() || image.is_empty() {
            warn!("add friend rejected: missing name or image");
            return Err(FormError::MissingFields.into());
        }

        let id = FriendId::generate();
        let friend = Friend::new(id.clone(), name, with_uniqueness_param(image, &id), 0.0);
        info!(id = %id, name, "friend added");
        self.friends.push(friend);

        let mode = std::mem::take(&mut self.mode);
        self.mode = mode.closing_add_form();
        Ok(id)
    }

    /// Select a friend, or deselect them if they are already selected.
    /// Either way the add-friend form closes.
    pub fn select_friend(&mut self, id: &FriendId) -> Result<(), LedgerError> {
        if self.friend(id).is_none() {
            return Err(LedgerError::UnknownFriend(id.clone()));
        }

        self.mode = if self.selected_friend_id() == Some(id) {
            Mode::Idle
        } else {
            Mode::SplittingBill(id.clone())
        };
        debug!(mode = ?self.mode, "selection changed");
        Ok(())
    }

    /// Add `delta` to the selected friend's balance.
    pub fn split_bill(&mut self, delta: f64) -> Result<(), LedgerError> {
        let id = self.selected_friend_id().cloned().ok_or(LedgerError::NoSelection)?;
        let friend = self
            .friends
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(LedgerError::UnknownFriend(id))?;

        friend.balance += delta;
        info!(id = %friend.id, delta, balance = friend.balance, "bill split");
        Ok(())
    }
}

/// Append `u=<id>` to an image URL, respecting an existing query string.
fn with_uniqueness_param(image: &str, id: &FriendId) -> String {
    let sep = if image.contains('?') { '&' } else { '?' };
    format!("{}{}u={}", image, sep, id)
}

/// Clark, Sarah and Anthony, the starter roster.
pub fn sample_friends() -> Vec<Friend> {
    [("118836", "Clark", -7.0), ("933372", "Sarah", 20.0), ("499476", "Anthony", 0.0)]
        .into_iter()
        .map(|(id, name, balance)| {
            Friend::new(
                FriendId::from(id),
                name,
                format!("{}?u={}", DEFAULT_IMAGE_URL, id),
                balance,
            )
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
