//! Account repository for account-group and ledger operations.

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use storebooks_core::ledger::{AccountGroup, AccountType, Ledger, signed_amount};
use storebooks_shared::types::{AccountGroupId, EntryId, LedgerId, Money, TransactionId, UserId};

use crate::Store;

/// Error types for account operations.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    /// Account group not found.
    #[error("Account group not found: {0}")]
    GroupNotFound(AccountGroupId),

    /// Ledger not found.
    #[error("Ledger not found: {0}")]
    LedgerNotFound(LedgerId),

    /// Account group is inactive.
    #[error("Account group is inactive: {0}")]
    InactiveGroup(AccountGroupId),

    /// Group name already used for this account type.
    #[error("Account group '{name}' already exists for this type")]
    DuplicateGroupName {
        /// The conflicting name.
        name: String,
    },

    /// Name is empty or whitespace.
    #[error("Name must not be empty")]
    EmptyName,
}

/// Input for creating an account group.
#[derive(Debug, Clone)]
pub struct CreateAccountGroupInput {
    /// Group name.
    pub name: String,
    /// Account classification (immutable afterwards).
    pub account_type: AccountType,
    /// Optional description.
    pub description: Option<String>,
}

/// Input for updating an account group. The account type is immutable.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountGroupInput {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Filter options for listing account groups.
#[derive(Debug, Clone, Default)]
pub struct GroupFilter {
    /// Filter by account type.
    pub account_type: Option<AccountType>,
    /// Filter by active flag.
    pub is_active: Option<bool>,
}

/// Input for creating a ledger.
#[derive(Debug, Clone)]
pub struct CreateLedgerInput {
    /// Ledger name.
    pub name: String,
    /// Owning account group.
    pub group_id: AccountGroupId,
    /// Opening balance in minor units.
    pub opening_balance: Money,
    /// Optional description.
    pub description: Option<String>,
    /// Creating user.
    pub created_by: UserId,
}

/// Input for updating a ledger.
#[derive(Debug, Clone, Default)]
pub struct UpdateLedgerInput {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Filter options for listing ledgers.
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    /// Filter by owning group.
    pub group_id: Option<AccountGroupId>,
    /// Filter by active flag.
    pub is_active: Option<bool>,
    /// Case-insensitive name search.
    pub search: Option<String>,
}

/// A ledger with its derived current balance.
#[derive(Debug, Clone)]
pub struct LedgerWithBalance {
    /// The ledger.
    pub ledger: Ledger,
    /// Owning group name.
    pub group_name: String,
    /// Owning group type.
    pub group_type: AccountType,
    /// Derived balance over all approved entries.
    pub current_balance: Money,
}

/// A recent entry line for the ledger balance view.
#[derive(Debug, Clone)]
pub struct RecentEntry {
    /// Entry ID.
    pub id: EntryId,
    /// Owning transaction.
    pub transaction_id: TransactionId,
    /// Posting date.
    pub date: NaiveDate,
    /// Debit amount (zero for credits).
    pub debit: Money,
    /// Credit amount (zero for debits).
    pub credit: Money,
    /// Entry description.
    pub description: Option<String>,
}

/// Balance detail for one ledger.
#[derive(Debug, Clone)]
pub struct LedgerBalanceSummary {
    /// The ledger.
    pub ledger_id: LedgerId,
    /// Ledger name.
    pub ledger_name: String,
    /// Owning group name.
    pub group_name: String,
    /// Opening balance.
    pub opening_balance: Money,
    /// Total approved debits.
    pub debit_total: Money,
    /// Total approved credits.
    pub credit_total: Money,
    /// Derived current balance.
    pub current_balance: Money,
    /// Most recent entries, newest first (up to 10).
    pub recent_entries: Vec<RecentEntry>,
}

/// Repository for account groups and ledgers.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    store: Store,
}

impl AccountRepository {
    /// Creates a new account repository over the shared store.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Creates an account group.
    ///
    /// # Errors
    ///
    /// Returns an error when the name is empty or already used for the
    /// same account type.
    pub async fn create_group(
        &self,
        input: CreateAccountGroupInput,
    ) -> Result<AccountGroup, AccountError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AccountError::EmptyName);
        }

        let mut inner = self.store.write().await;

        let duplicate = inner.groups.values().any(|g| {
            g.account_type == input.account_type && g.name.eq_ignore_ascii_case(&name)
        });
        if duplicate {
            return Err(AccountError::DuplicateGroupName { name });
        }

        let now = Utc::now();
        let group = AccountGroup {
            id: AccountGroupId::new(),
            name,
            account_type: input.account_type,
            description: input.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        inner.groups.insert(group.id, group.clone());
        Ok(group)
    }

    /// Lists account groups, sorted by (type, name).
    pub async fn list_groups(&self, filter: GroupFilter) -> Vec<AccountGroup> {
        let inner = self.store.read().await;
        let mut groups: Vec<AccountGroup> = inner
            .groups
            .values()
            .filter(|g| filter.account_type.is_none_or(|t| g.account_type == t))
            .filter(|g| filter.is_active.is_none_or(|a| g.is_active == a))
            .cloned()
            .collect();
        groups.sort_by(|a, b| {
            (a.account_type.as_str(), &a.name).cmp(&(b.account_type.as_str(), &b.name))
        });
        groups
    }

    /// Fetches one account group.
    ///
    /// # Errors
    ///
    /// Returns `GroupNotFound` for unknown ids.
    pub async fn get_group(&self, id: AccountGroupId) -> Result<AccountGroup, AccountError> {
        let inner = self.store.read().await;
        inner
            .groups
            .get(&id)
            .cloned()
            .ok_or(AccountError::GroupNotFound(id))
    }

    /// Updates an account group. The account type cannot change.
    ///
    /// # Errors
    ///
    /// Returns `GroupNotFound` for unknown ids and `EmptyName` for blank names.
    pub async fn update_group(
        &self,
        id: AccountGroupId,
        input: UpdateAccountGroupInput,
    ) -> Result<AccountGroup, AccountError> {
        let mut inner = self.store.write().await;
        let group = inner
            .groups
            .get_mut(&id)
            .ok_or(AccountError::GroupNotFound(id))?;

        if let Some(name) = input.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AccountError::EmptyName);
            }
            group.name = name;
        }
        if let Some(description) = input.description {
            group.description = Some(description);
        }
        if let Some(is_active) = input.is_active {
            group.is_active = is_active;
        }
        group.updated_at = Utc::now();

        Ok(group.clone())
    }

    /// Creates a ledger under an active account group.
    ///
    /// # Errors
    ///
    /// Returns an error when the group is unknown or inactive, or the name
    /// is empty.
    pub async fn create_ledger(&self, input: CreateLedgerInput) -> Result<Ledger, AccountError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AccountError::EmptyName);
        }

        let mut inner = self.store.write().await;

        let group = inner
            .groups
            .get(&input.group_id)
            .ok_or(AccountError::GroupNotFound(input.group_id))?;
        if !group.is_active {
            return Err(AccountError::InactiveGroup(input.group_id));
        }

        let now = Utc::now();
        let ledger = Ledger {
            id: LedgerId::new(),
            group_id: input.group_id,
            name,
            opening_balance: input.opening_balance,
            description: input.description,
            is_active: true,
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
        };
        inner.ledgers.insert(ledger.id, ledger.clone());
        Ok(ledger)
    }

    /// Lists ledgers with derived current balances, sorted by name.
    pub async fn list_ledgers(&self, filter: LedgerFilter) -> Vec<LedgerWithBalance> {
        let inner = self.store.read().await;
        let posted = inner.posted_entries();

        let mut rows: Vec<LedgerWithBalance> = inner
            .ledgers
            .values()
            .filter(|l| filter.group_id.is_none_or(|g| l.group_id == g))
            .filter(|l| filter.is_active.is_none_or(|a| l.is_active == a))
            .filter(|l| {
                filter
                    .search
                    .as_ref()
                    .is_none_or(|s| l.name.to_lowercase().contains(&s.to_lowercase()))
            })
            .filter_map(|ledger| {
                let group = inner.groups.get(&ledger.group_id)?;
                let normal = group.account_type.normal_balance();
                let current_balance = posted
                    .iter()
                    .filter(|e| e.entry.ledger_id == ledger.id)
                    .fold(ledger.opening_balance, |acc, e| {
                        acc + signed_amount(normal, e.entry.entry_type, e.entry.amount)
                    });
                Some(LedgerWithBalance {
                    ledger: ledger.clone(),
                    group_name: group.name.clone(),
                    group_type: group.account_type,
                    current_balance,
                })
            })
            .collect();

        rows.sort_by(|a, b| a.ledger.name.cmp(&b.ledger.name));
        rows
    }

    /// Fetches one ledger with its derived current balance.
    ///
    /// # Errors
    ///
    /// Returns `LedgerNotFound` for unknown ids.
    pub async fn get_ledger(&self, id: LedgerId) -> Result<LedgerWithBalance, AccountError> {
        self.list_ledgers(LedgerFilter::default())
            .await
            .into_iter()
            .find(|l| l.ledger.id == id)
            .ok_or(AccountError::LedgerNotFound(id))
    }

    /// Updates a ledger.
    ///
    /// # Errors
    ///
    /// Returns `LedgerNotFound` for unknown ids and `EmptyName` for blank names.
    pub async fn update_ledger(
        &self,
        id: LedgerId,
        input: UpdateLedgerInput,
    ) -> Result<Ledger, AccountError> {
        let mut inner = self.store.write().await;
        let ledger = inner
            .ledgers
            .get_mut(&id)
            .ok_or(AccountError::LedgerNotFound(id))?;

        if let Some(name) = input.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AccountError::EmptyName);
            }
            ledger.name = name;
        }
        if let Some(description) = input.description {
            ledger.description = Some(description);
        }
        if let Some(is_active) = input.is_active {
            ledger.is_active = is_active;
        }
        ledger.updated_at = Utc::now();

        Ok(ledger.clone())
    }

    /// Balance detail for one ledger: totals plus the ten most recent entries.
    ///
    /// # Errors
    ///
    /// Returns `LedgerNotFound` for unknown ids.
    pub async fn ledger_balance(
        &self,
        id: LedgerId,
    ) -> Result<LedgerBalanceSummary, AccountError> {
        let inner = self.store.read().await;
        let ledger = inner
            .ledgers
            .get(&id)
            .ok_or(AccountError::LedgerNotFound(id))?;
        let group = inner
            .groups
            .get(&ledger.group_id)
            .ok_or(AccountError::GroupNotFound(ledger.group_id))?;

        let mut debit_total = Money::ZERO;
        let mut credit_total = Money::ZERO;
        let mut entries: Vec<RecentEntry> = Vec::new();

        let posted = inner.posted_entries();
        let mut ledger_entries: Vec<_> = posted
            .iter()
            .filter(|e| e.entry.ledger_id == id)
            .collect();
        ledger_entries.sort_by_key(|e| (e.date, e.seq));

        for posted in &ledger_entries {
            debit_total += posted.entry.debit();
            credit_total += posted.entry.credit();
        }

        for posted in ledger_entries.iter().rev().take(10) {
            entries.push(RecentEntry {
                id: posted.entry.id,
                transaction_id: posted.entry.transaction_id,
                date: posted.date,
                debit: posted.entry.debit(),
                credit: posted.entry.credit(),
                description: posted.entry.description.clone(),
            });
        }

        let normal = group.account_type.normal_balance();
        let current_balance =
            ledger.opening_balance + normal.balance_change(debit_total, credit_total);

        Ok(LedgerBalanceSummary {
            ledger_id: ledger.id,
            ledger_name: ledger.name.clone(),
            group_name: group.name.clone(),
            opening_balance: ledger.opening_balance,
            debit_total,
            credit_total,
            current_balance,
            recent_entries: entries,
        })
    }

    /// Finds the designated inventory ledger by case-insensitive name
    /// containment, preferring active ledgers.
    pub async fn find_ledger_by_name_fragment(&self, fragment: &str) -> Option<Ledger> {
        let inner = self.store.read().await;
        let fragment = fragment.to_lowercase();
        let mut candidates: Vec<&Ledger> = inner
            .ledgers
            .values()
            .filter(|l| l.is_active && l.name.to_lowercase().contains(&fragment))
            .collect();
        candidates.sort_by(|a, b| a.name.cmp(&b.name));
        candidates.first().map(|l| (*l).clone())
    }
}
