use super::{PaginationFilter, Predicate, RepositoryError, RepositoryResult, TIdentity, TReadRepository, TRepository};
use async_trait::async_trait;
use hashbrown::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tokio::sync::RwLock;

enum Staged<M, Id> {
	Create(M),
	Update(M),
	Remove(Id),
}

struct Table<M, Id> {
	sequence: u64,
	rows: HashMap<Id, (u64, M)>,
}

impl<M, Id> Default for Table<M, Id> {
	fn default() -> Self {
		Self {
			sequence: 0,
			rows: HashMap::new(),
		}
	}
}

impl<M: Clone, Id> Table<M, Id> {
	/// Rows in insertion order.
	fn ordered(&self) -> Vec<M> {
		let mut rows: Vec<&(u64, M)> = self.rows.values().collect();
		rows.sort_by_key(|(seq, _)| *seq);
		rows.into_iter().map(|(_, model)| model.clone()).collect()
	}
}

/// Keeps committed rows in memory. Writes wait in a staging list until
/// `commit`, which applies all of them or none.
pub struct InMemoryRepository<M, Id> {
	table: RwLock<Table<M, Id>>,
	staged: RwLock<Vec<Staged<M, Id>>>,
}

impl<M, Id> Default for InMemoryRepository<M, Id> {
	fn default() -> Self {
		Self {
			table: RwLock::new(Table::default()),
			staged: RwLock::new(Vec::new()),
		}
	}
}

impl<M, Id> InMemoryRepository<M, Id>
where
	M: TIdentity<Id> + Clone + Send + Sync + 'static,
	Id: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
	pub fn new() -> Self {
		Self::default()
	}

	/// Drops every staged write.
	pub async fn rollback(&self) {
		self.staged.write().await.clear();
	}

	pub async fn pending(&self) -> usize {
		self.staged.read().await.len()
	}
}

#[async_trait]
impl<M, Id> TReadRepository<M, Id> for InMemoryRepository<M, Id>
where
	M: TIdentity<Id> + Clone + Send + Sync + 'static,
	Id: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
	async fn exists(&self, id: &Id) -> RepositoryResult<bool> {
		Ok(self.table.read().await.rows.contains_key(id))
	}

	async fn find_by_id(&self, id: &Id) -> RepositoryResult<Option<M>> {
		Ok(self.table.read().await.rows.get(id).map(|(_, model)| model.clone()))
	}

	async fn find_by(&self, predicate: Predicate<'_, M>, pagination: PaginationFilter) -> RepositoryResult<Vec<M>> {
		let rows = self.table.read().await.ordered();
		Ok(pagination.apply(rows.into_iter().filter(|model| predicate(model))))
	}

	async fn get_all(&self, pagination: PaginationFilter) -> RepositoryResult<Vec<M>> {
		Ok(pagination.apply(self.table.read().await.ordered()))
	}

	async fn count(&self) -> RepositoryResult<usize> {
		Ok(self.table.read().await.rows.len())
	}
}

#[async_trait]
impl<M, Id> TRepository<M, Id> for InMemoryRepository<M, Id>
where
	M: TIdentity<Id> + Clone + Send + Sync + 'static,
	Id: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
	async fn create(&self, model: M) -> RepositoryResult<()> {
		self.staged.write().await.push(Staged::Create(model));
		Ok(())
	}

	async fn update(&self, model: M) -> RepositoryResult<()> {
		self.staged.write().await.push(Staged::Update(model));
		Ok(())
	}

	async fn remove(&self, id: &Id) -> RepositoryResult<()> {
		self.staged.write().await.push(Staged::Remove(id.clone()));
		Ok(())
	}

	async fn commit(&self) -> RepositoryResult<()> {
		let mut staged = self.staged.write().await;
		let mut table = self.table.write().await;

		let mut sequence = table.sequence;
		let mut rows = table.rows.clone();
		for write in staged.iter() {
			match write {
				Staged::Create(model) => {
					let id = model.id();
					if rows.contains_key(&id) {
						return Err(RepositoryError::AlreadyExists(format!("{id:?}")));
					}
					sequence += 1;
					rows.insert(id, (sequence, model.clone()));
				}
				Staged::Update(model) => {
					let id = model.id();
					match rows.get_mut(&id) {
						Some((_, row)) => *row = model.clone(),
						None => return Err(RepositoryError::NotFound(format!("{id:?}"))),
					}
				}
				Staged::Remove(id) => {
					if rows.remove(id).is_none() {
						return Err(RepositoryError::NotFound(format!("{id:?}")));
					}
				}
			}
		}

		tracing::debug!(writes = staged.len(), "in-memory commit");
		table.sequence = sequence;
		table.rows = rows;
		staged.clear();
		Ok(())
	}
}
