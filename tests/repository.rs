use courier::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Product {
	id: u32,
	name: String,
	price: u32,
}

impl Product {
	fn new(id: u32, name: &str, price: u32) -> Self {
		Self {
			id,
			name: name.to_owned(),
			price,
		}
	}
}

impl TIdentity<u32> for Product {
	fn id(&self) -> u32 {
		self.id
	}
}

#[derive(Debug, PartialEq)]
struct ProductView {
	label: String,
}

struct ProductMapper;

impl TMapper<Product, ProductView> for ProductMapper {
	fn map(&self, from: Product) -> ProductView {
		ProductView {
			label: format!("{} ({})", from.name, from.price),
		}
	}
}

#[tokio::test]
async fn test_writes_are_invisible_until_commit() {
	let repository = InMemoryRepository::<Product, u32>::new();
	repository.create(Product::new(1, "pen", 2)).await.unwrap();

	assert!(!repository.exists(&1).await.unwrap());
	assert_eq!(repository.pending().await, 1);

	repository.commit().await.unwrap();
	assert!(repository.exists(&1).await.unwrap());
	assert_eq!(repository.find_by_id(&1).await.unwrap(), Some(Product::new(1, "pen", 2)));
	assert_eq!(repository.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_rollback_discards_staged_writes() {
	let repository = InMemoryRepository::<Product, u32>::new();
	repository.create(Product::new(1, "pen", 2)).await.unwrap();
	repository.rollback().await;
	repository.commit().await.unwrap();
	assert_eq!(repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_save_creates_then_updates() {
	let repository = InMemoryRepository::<Product, u32>::new();
	repository.save(Product::new(1, "pen", 2)).await.unwrap();
	repository.commit().await.unwrap();

	repository.save(Product::new(1, "pen", 3)).await.unwrap();
	repository.commit().await.unwrap();

	assert_eq!(repository.count().await.unwrap(), 1);
	assert_eq!(repository.find_by_id(&1).await.unwrap().map(|p| p.price), Some(3));
}

#[tokio::test]
async fn test_failed_commit_applies_nothing() {
	let repository = InMemoryRepository::<Product, u32>::new();
	repository.create(Product::new(1, "pen", 2)).await.unwrap();
	repository.commit().await.unwrap();

	repository.create(Product::new(2, "ink", 5)).await.unwrap();
	repository.remove(&9).await.unwrap();
	let err = repository.commit().await.unwrap_err();

	assert!(matches!(err, RepositoryError::NotFound(_)));
	assert_eq!(repository.count().await.unwrap(), 1);
	assert!(!repository.exists(&2).await.unwrap());
}

#[tokio::test]
async fn test_pagination_and_predicates() {
	let repository = InMemoryRepository::<Product, u32>::new();
	for id in 1..=25 {
		repository.create(Product::new(id, &format!("item-{id}"), id * 10)).await.unwrap();
	}
	repository.commit().await.unwrap();

	let first_page = repository.get_all(PaginationFilter::default()).await.unwrap();
	assert_eq!(first_page.len(), 20);
	assert_eq!(first_page[0].id, 1);

	let second_page = repository.get_all(PaginationFilter::new(2, 20)).await.unwrap();
	assert_eq!(second_page.iter().map(|p| p.id).collect::<Vec<_>>(), (21..=25).collect::<Vec<_>>());

	let expensive = repository.find_by(&|p: &Product| p.price > 200, PaginationFilter::new(1, 3)).await.unwrap();
	assert_eq!(expensive.iter().map(|p| p.id).collect::<Vec<_>>(), vec![21, 22, 23]);

	let zero_page = PaginationFilter::new(0, 0);
	assert_eq!(repository.get_all(zero_page).await.unwrap().len(), 1);
}

#[test]
fn test_mapper() {
	let views = ProductMapper.map_all(vec![Product::new(1, "pen", 2)]);
	assert_eq!(
		views,
		vec![ProductView {
			label: "pen (2)".to_string()
		}]
	);
}

#[derive(Debug, TCommand)]
struct DeleteProduct {
	header: WorkHeader,
	id: u32,
}

struct DeleteProductHandler {
	repository: Arc<InMemoryRepository<Product, u32>>,
}

#[async_trait]
impl TCommandHandler<DeleteProduct> for DeleteProductHandler {
	async fn handle(&self, command: DeleteProduct, bus: &ServiceBus) -> HandlerResult<bool> {
		self.repository.remove(&command.id).await?;
		if let Err(err) = self.repository.commit().await {
			self.repository.rollback().await;
			bus.publish_event(courier::system_error!(err: err).with_code("REPO").with_object(&command.id)).await?;
			return Ok(false);
		}
		Ok(true)
	}
}

#[tokio::test]
async fn test_handler_turns_repository_failure_into_system_error() {
	let repository = Arc::new(InMemoryRepository::<Product, u32>::new());
	let registry = HandlerRegistry::builder()
		.command::<DeleteProduct>(DeleteProductHandler {
			repository: Arc::clone(&repository),
		})
		.build()
		.unwrap();
	let bus = ServiceBus::new(Arc::new(registry));

	let deleted = bus
		.send_command(DeleteProduct {
			header: WorkHeader::command::<DeleteProduct>(),
			id: 404,
		})
		.await
		.unwrap();

	assert!(!deleted);
	assert_eq!(repository.pending().await, 0);
	let errors = bus.notifications().system_errors().await;
	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].code(), Some("REPO"));
	assert!(errors[0].location().method.as_deref().is_some_and(|m| m.ends_with("handle")));
	assert_eq!(errors[0].object_manipulated(), Some(&serde_json::json!(404)));
	assert!(errors[0].message().contains("404"));
}
