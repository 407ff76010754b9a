//! In-memory repositories for service tests.

use std::sync::Mutex;

use rust_decimal::Decimal;

use moneta_shared::types::{CategoryId, EntryId, UserId};

use crate::category::{Category, CategoryError, CategoryRepository};
use crate::entry::{Entry, EntryError, EntryFilter, EntryRepository, EntryStatus, EntryType};
use crate::user::{NewUser, User, UserError, UserRepository};

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn with_user(name: &str) -> (Self, User) {
        let user = User {
            id: UserId::new(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: String::new(),
        };
        let repo = Self {
            users: Mutex::new(vec![user.clone()]),
        };
        (repo, user)
    }
}

impl UserRepository for InMemoryUsers {
    async fn create(&self, input: NewUser) -> Result<User, UserError> {
        let user = User {
            id: UserId::new(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, UserError> {
        Ok(self.users.lock().unwrap().iter().any(|u| u.email == email))
    }
}

#[derive(Default)]
pub struct InMemoryCategories {
    categories: Mutex<Vec<Category>>,
}

impl InMemoryCategories {
    pub fn with(descriptions: &[&str]) -> Self {
        let categories = descriptions
            .iter()
            .map(|d| Category {
                id: CategoryId::new(),
                description: (*d).to_string(),
            })
            .collect();
        Self {
            categories: Mutex::new(categories),
        }
    }

    pub fn id_of(&self, description: &str) -> Option<CategoryId> {
        self.categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.description == description)
            .map(|c| c.id)
    }
}

impl CategoryRepository for InMemoryCategories {
    async fn create(&self, description: &str) -> Result<Category, CategoryError> {
        let category = Category {
            id: CategoryId::new(),
            description: description.to_string(),
        };
        self.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn list(&self) -> Result<Vec<Category>, CategoryError> {
        let mut all = self.categories.lock().unwrap().clone();
        all.sort_by(|a, b| a.description.cmp(&b.description));
        Ok(all)
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CategoryError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_by_description(&self, description: &str) -> Result<Option<Category>, CategoryError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.description == description)
            .cloned())
    }
}

/// Entry store that also records how it was called.
#[derive(Default)]
pub struct InMemoryEntries {
    entries: Mutex<Vec<Entry>>,
    batches: Mutex<Vec<usize>>,
    updates: Mutex<usize>,
}

impl InMemoryEntries {
    pub fn seeded(entries: Vec<Entry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    pub fn all(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }

    /// Sizes of every `insert_many` call, in order.
    pub fn batches(&self) -> Vec<usize> {
        self.batches.lock().unwrap().clone()
    }

    pub fn update_calls(&self) -> usize {
        *self.updates.lock().unwrap()
    }
}

impl EntryRepository for InMemoryEntries {
    async fn insert(&self, entry: Entry) -> Result<Entry, EntryError> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn insert_many(&self, entries: Vec<Entry>) -> Result<Vec<Entry>, EntryError> {
        self.batches.lock().unwrap().push(entries.len());
        self.entries.lock().unwrap().extend(entries.iter().cloned());
        Ok(entries)
    }

    async fn update(&self, entry: Entry) -> Result<Entry, EntryError> {
        *self.updates.lock().unwrap() += 1;
        let mut entries = self.entries.lock().unwrap();
        let slot = entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or(EntryError::NotFound)?;
        *slot = entry.clone();
        Ok(entry)
    }

    async fn delete(&self, id: EntryId) -> Result<bool, EntryError> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        Ok(entries.len() < before)
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>, EntryError> {
        Ok(self.entries.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn search(&self, filter: &EntryFilter) -> Result<Vec<Entry>, EntryError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }

    async fn settled_sum(
        &self,
        user_id: UserId,
        entry_type: EntryType,
    ) -> Result<Option<Decimal>, EntryError> {
        let entries = self.entries.lock().unwrap();
        let settled: Vec<Decimal> = entries
            .iter()
            .filter(|e| {
                e.user_id == user_id
                    && e.entry_type == entry_type
                    && e.status == EntryStatus::Settled
            })
            .map(|e| e.amount)
            .collect();

        if settled.is_empty() {
            Ok(None)
        } else {
            Ok(Some(settled.into_iter().sum()))
        }
    }
}
