//! Narrow persistence, validation and mapping interfaces handlers depend on.
//!
//! The real implementations live with the application (an ORM, a document
//! store). [`in_memory::InMemoryRepository`] is a test double.

pub mod in_memory;

use crate::responses::BoxError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
	#[error("entity {0} not found")]
	NotFound(String),
	#[error("entity {0} already exists")]
	AlreadyExists(String),
	#[error(transparent)]
	Backend(#[from] BoxError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Page selection. Values below 1 are read as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationFilter {
	page_number: u32,
	page_size: u32,
}

impl Default for PaginationFilter {
	fn default() -> Self {
		Self {
			page_number: DEFAULT_PAGE_NUMBER,
			page_size: DEFAULT_PAGE_SIZE,
		}
	}
}

impl PaginationFilter {
	pub fn new(page_number: u32, page_size: u32) -> Self {
		Self {
			page_number: page_number.max(1),
			page_size: page_size.max(1),
		}
	}

	pub fn page_number(&self) -> u32 {
		self.page_number.max(1)
	}

	pub fn page_size(&self) -> u32 {
		self.page_size.max(1)
	}

	pub fn skip_length(&self) -> usize {
		(self.page_number() as usize - 1) * self.page_size() as usize
	}

	/// Slices an already ordered sequence.
	pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
		items.into_iter().skip(self.skip_length()).take(self.page_size() as usize).collect()
	}
}

/// Models a repository can key by.
pub trait TIdentity<Id> {
	fn id(&self) -> Id;
}

pub type Predicate<'a, M> = &'a (dyn Fn(&M) -> bool + Send + Sync);

#[async_trait]
pub trait TReadRepository<M, Id>: Send + Sync
where
	M: Send + Sync + 'static,
	Id: Send + Sync + 'static,
{
	async fn exists(&self, id: &Id) -> RepositoryResult<bool>;

	async fn find_by_id(&self, id: &Id) -> RepositoryResult<Option<M>>;

	async fn find_by(&self, predicate: Predicate<'_, M>, pagination: PaginationFilter) -> RepositoryResult<Vec<M>>;

	async fn get_all(&self, pagination: PaginationFilter) -> RepositoryResult<Vec<M>>;

	async fn count(&self) -> RepositoryResult<usize>;
}

/// Writes are staged and only become visible on [`commit`](TRepository::commit).
#[async_trait]
pub trait TRepository<M, Id>: TReadRepository<M, Id>
where
	M: TIdentity<Id> + Send + Sync + 'static,
	Id: Send + Sync + 'static,
{
	async fn create(&self, model: M) -> RepositoryResult<()>;

	async fn update(&self, model: M) -> RepositoryResult<()>;

	async fn remove(&self, id: &Id) -> RepositoryResult<()>;

	async fn commit(&self) -> RepositoryResult<()>;

	/// Updates when the model already exists, creates it otherwise.
	async fn save(&self, model: M) -> RepositoryResult<()> {
		match self.exists(&model.id()).await? {
			true => self.update(model).await,
			false => self.create(model).await,
		}
	}
}

/// Domain model to view model translation.
pub trait TMapper<Source, Target> {
	fn map(&self, from: Source) -> Target;

	fn map_all(&self, from: impl IntoIterator<Item = Source>) -> Vec<Target>
	where
		Self: Sized,
	{
		from.into_iter().map(|item| self.map(item)).collect()
	}
}
