//! redb-based marketplace storage
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `users` | `email` | `User` (JSON) | Accounts |
//! | `products` | `product_id` | `Product` (JSON) | Listings + stock |
//! | `orders` | `order_id` | `Order` (JSON) | Placed orders |
//! | `ledger` | `order_id` | `LedgerEntry` (JSON) | Append-only hashed log |
//! | `counters` | `name` | `u64` | Last allocated ids |
//!
//! Order placement (stock check, decrement, order insert, ledger insert)
//! runs inside one write transaction. redb serializes writers, so stock can
//! never go negative and two requests can never get the same id.

mod error;

pub use error::{StorageError, StorageResult};

use chrono::{DateTime, Utc};
use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
    WriteTransaction,
};
use serde::{Serialize, de::DeserializeOwned};
use shared::models::{
    LedgerEntry, ORDER_ID_BASE, Order, OrderBuyer, PlacedOrder, Product, User,
};
use shared::pricing::{PriceQuote, PricingResult};
use std::path::Path;
use std::sync::Arc;

/// key = email, value = JSON-serialized User
const USERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// key = product id, value = JSON-serialized Product
const PRODUCTS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("products");

/// key = order id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("orders");

/// key = order id, value = JSON-serialized LedgerEntry
///
/// Order ids are allocated in commit order, so key order is append order.
const LEDGER_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("ledger");

/// key = counter name, value = last allocated id
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

const PRODUCT_ID_KEY: &str = "product_id";
const ORDER_ID_KEY: &str = "order_id";

/// Row counts (health endpoint)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    pub users: u64,
    pub products: u64,
    pub orders: u64,
    pub ledger_entries: u64,
}

/// Marketplace storage backed by redb
#[derive(Clone)]
pub struct MarketStorage {
    db: Arc<Database>,
}

impl MarketStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_table(PRODUCTS_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(LEDGER_TABLE)?;

            let mut counters = write_txn.open_table(COUNTERS_TABLE)?;
            if counters.get(PRODUCT_ID_KEY)?.is_none() {
                counters.insert(PRODUCT_ID_KEY, 0u64)?;
            }
            if counters.get(ORDER_ID_KEY)?.is_none() {
                counters.insert(ORDER_ID_KEY, ORDER_ID_BASE)?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Counters ==========

    /// Increment and return the named counter (within transaction)
    fn next_id(txn: &WriteTransaction, key: &str) -> StorageResult<u64> {
        let mut table = txn.open_table(COUNTERS_TABLE)?;
        let current = table.get(key)?.map(|guard| guard.value()).unwrap_or(0);
        let next = current + 1;
        table.insert(key, next)?;
        Ok(next)
    }

    // ========== Users ==========

    /// Insert a new user; fails with `UserExists` if the email is taken
    pub fn create_user(&self, user: &User) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(USERS_TABLE)?;
            if table.get(user.email.as_str())?.is_some() {
                return Err(StorageError::UserExists(user.email.clone()));
            }
            let bytes = serde_json::to_vec(user)?;
            table.insert(user.email.as_str(), bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Look up a user by email
    pub fn get_user(&self, email: &str) -> StorageResult<Option<User>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS_TABLE)?;
        let user = match table.get(email)? {
            Some(guard) => Some(serde_json::from_slice(guard.value())?),
            None => None,
        };
        Ok(user)
    }

    // ========== Products ==========

    /// Allocate the next product id and store the product built for it
    pub fn create_product(&self, build: impl FnOnce(u64) -> Product) -> StorageResult<Product> {
        let txn = self.db.begin_write()?;
        let id = Self::next_id(&txn, PRODUCT_ID_KEY)?;
        let product = build(id);
        {
            let mut table = txn.open_table(PRODUCTS_TABLE)?;
            let bytes = serde_json::to_vec(&product)?;
            table.insert(product.id, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(product)
    }

    /// Get a product by id
    pub fn get_product(&self, id: u64) -> StorageResult<Option<Product>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PRODUCTS_TABLE)?;
        let product = match table.get(id)? {
            Some(guard) => Some(serde_json::from_slice(guard.value())?),
            None => None,
        };
        Ok(product)
    }

    /// All products in id order
    pub fn list_products(&self) -> StorageResult<Vec<Product>> {
        self.scan(PRODUCTS_TABLE, |_| true)
    }

    /// Products owned by a farmer
    pub fn list_products_by_farmer(&self, farmer_email: &str) -> StorageResult<Vec<Product>> {
        self.scan(PRODUCTS_TABLE, |p: &Product| p.farmer_email == farmer_email)
    }

    // ========== Orders ==========

    /// Orders for products owned by a farmer, in id order
    pub fn list_orders_by_farmer(&self, farmer_email: &str) -> StorageResult<Vec<Order>> {
        self.scan(ORDERS_TABLE, |o: &Order| o.farmer_email == farmer_email)
    }

    /// Place an order in one write transaction
    ///
    /// `price` is called with the product as stored at transaction start
    /// (current `masp` and `available`). Nothing is written unless every
    /// step succeeds.
    pub fn place_order(
        &self,
        product_id: u64,
        qty: u32,
        buyer: &OrderBuyer,
        price: impl FnOnce(&Product) -> PricingResult<PriceQuote>,
        now: DateTime<Utc>,
    ) -> StorageResult<PlacedOrder> {
        let txn = self.db.begin_write()?;

        let mut product: Product = {
            let table = txn.open_table(PRODUCTS_TABLE)?;
            let product = match table.get(product_id)? {
                Some(guard) => serde_json::from_slice(guard.value())?,
                None => return Err(StorageError::ProductNotFound(product_id)),
            };
            product
        };

        let pricing = price(&product)?;

        if qty > product.available {
            return Err(StorageError::InsufficientStock {
                requested: qty,
                available: product.available,
            });
        }
        product.available -= qty;

        let order_id = Self::next_id(&txn, ORDER_ID_KEY)?;
        let order = Order::place(order_id, &product, buyer, qty, pricing, now)?;
        let ledger_entry = LedgerEntry::seal(order.clone(), now)?;

        {
            let mut products = txn.open_table(PRODUCTS_TABLE)?;
            let bytes = serde_json::to_vec(&product)?;
            products.insert(product.id, bytes.as_slice())?;

            let mut orders = txn.open_table(ORDERS_TABLE)?;
            let bytes = serde_json::to_vec(&order)?;
            orders.insert(order.id, bytes.as_slice())?;

            let mut ledger = txn.open_table(LEDGER_TABLE)?;
            let bytes = serde_json::to_vec(&ledger_entry)?;
            ledger.insert(ledger_entry.order_id, bytes.as_slice())?;
        }
        txn.commit()?;

        Ok(PlacedOrder {
            order,
            ledger_entry,
        })
    }

    // ========== Ledger ==========

    /// All ledger entries in append order
    pub fn ledger_entries(&self) -> StorageResult<Vec<LedgerEntry>> {
        self.scan(LEDGER_TABLE, |_| true)
    }

    // ========== Stats ==========

    pub fn stats(&self) -> StorageResult<StorageStats> {
        let read_txn = self.db.begin_read()?;
        Ok(StorageStats {
            users: read_txn.open_table(USERS_TABLE)?.len()?,
            products: read_txn.open_table(PRODUCTS_TABLE)?.len()?,
            orders: read_txn.open_table(ORDERS_TABLE)?.len()?,
            ledger_entries: read_txn.open_table(LEDGER_TABLE)?.len()?,
        })
    }

    /// Deserialize every row of an id-keyed table, keeping those matching `keep`
    fn scan<T: DeserializeOwned>(
        &self,
        definition: TableDefinition<'static, u64, &'static [u8]>,
        keep: impl Fn(&T) -> bool,
    ) -> StorageResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(definition)?;
        let mut rows = Vec::new();
        for result in table.iter()? {
            let (_, value) = result?;
            let row: T = serde_json::from_slice(value.value())?;
            if keep(&row) {
                rows.push(row);
            }
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Role;
    use shared::pricing::{Jitter, PricingError, quote};

    fn storage() -> MarketStorage {
        MarketStorage::open_in_memory().unwrap()
    }

    fn add_product(storage: &MarketStorage, farmer: &str, masp: f64, available: u32) -> Product {
        storage
            .create_product(|id| Product {
                id,
                name: format!("produce-{id}"),
                farmer_email: farmer.to_string(),
                category: String::new(),
                quality: String::new(),
                masp,
                available,
                created_at: Utc::now(),
            })
            .unwrap()
    }

    fn flat(p: &Product) -> PricingResult<PriceQuote> {
        quote(p.masp, p.available, Jitter::Flat)
    }

    #[test]
    fn test_user_unique_by_email() {
        let storage = storage();
        let user = User {
            email: "asha@farm.in".to_string(),
            name: "Asha".to_string(),
            password_hash: "x".to_string(),
            role: Role::Farmer,
            created_at: Utc::now(),
        };
        storage.create_user(&user).unwrap();
        assert!(matches!(
            storage.create_user(&user),
            Err(StorageError::UserExists(_))
        ));
        assert_eq!(storage.get_user("asha@farm.in").unwrap().unwrap().name, "Asha");
        assert!(storage.get_user("nobody@farm.in").unwrap().is_none());
    }

    #[test]
    fn test_product_ids_start_at_one() {
        let storage = storage();
        assert_eq!(add_product(&storage, "a@farm.in", 10.0, 5).id, 1);
        assert_eq!(add_product(&storage, "b@farm.in", 10.0, 5).id, 2);
        assert_eq!(add_product(&storage, "a@farm.in", 10.0, 5).id, 3);

        let mine = storage.list_products_by_farmer("a@farm.in").unwrap();
        assert_eq!(mine.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(storage.list_products().unwrap().len(), 3);
    }

    #[test]
    fn test_place_order_decrements_stock_and_appends_ledger() {
        let storage = storage();
        let product = add_product(&storage, "a@farm.in", 10.0, 15);

        let placed = storage
            .place_order(product.id, 4, &OrderBuyer::default(), flat, Utc::now())
            .unwrap();

        assert_eq!(placed.order.id, 1001);
        assert_eq!(placed.order.unit_price, 15.0);
        assert_eq!(placed.order.total_price, 60.0);
        assert_eq!(placed.ledger_entry.order_id, 1001);
        assert!(placed.ledger_entry.verify());

        assert_eq!(storage.get_product(product.id).unwrap().unwrap().available, 11);
        let ledger = storage.ledger_entries().unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0], placed.ledger_entry);

        let second = storage
            .place_order(product.id, 1, &OrderBuyer::default(), flat, Utc::now())
            .unwrap();
        assert_eq!(second.order.id, 1002);
    }

    #[test]
    fn test_order_for_whole_stock_is_allowed() {
        let storage = storage();
        let product = add_product(&storage, "a@farm.in", 8.0, 3);
        storage
            .place_order(product.id, 3, &OrderBuyer::default(), flat, Utc::now())
            .unwrap();
        assert_eq!(storage.get_product(product.id).unwrap().unwrap().available, 0);
    }

    #[test]
    fn test_insufficient_stock_changes_nothing() {
        let storage = storage();
        let product = add_product(&storage, "a@farm.in", 10.0, 2);

        let err = storage
            .place_order(product.id, 3, &OrderBuyer::default(), flat, Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::InsufficientStock {
                requested: 3,
                available: 2
            }
        ));

        assert_eq!(storage.get_product(product.id).unwrap().unwrap().available, 2);
        assert!(storage.ledger_entries().unwrap().is_empty());
        assert_eq!(storage.stats().unwrap().orders, 0);

        // the failed attempt must not burn an order id
        let placed = storage
            .place_order(product.id, 2, &OrderBuyer::default(), flat, Utc::now())
            .unwrap();
        assert_eq!(placed.order.id, 1001);
    }

    #[test]
    fn test_unknown_product() {
        let storage = storage();
        let err = storage
            .place_order(42, 1, &OrderBuyer::default(), flat, Utc::now())
            .unwrap_err();
        assert!(matches!(err, StorageError::ProductNotFound(42)));
    }

    #[test]
    fn test_unpriceable_order_changes_nothing() {
        let storage = storage();
        let huge = add_product(&storage, "a@farm.in", 1e29, 5);
        let err = storage
            .place_order(huge.id, 1, &OrderBuyer::default(), flat, Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Pricing(PricingError::InvalidMasp(_))
        ));

        // unit price fits, unit_price * qty does not
        let big = add_product(&storage, "a@farm.in", 5.0e28, 5);
        let err = storage
            .place_order(big.id, 2, &OrderBuyer::default(), flat, Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Pricing(PricingError::TotalOutOfRange { qty: 2, .. })
        ));

        assert_eq!(storage.get_product(big.id).unwrap().unwrap().available, 5);
        assert!(storage.ledger_entries().unwrap().is_empty());

        let placed = storage
            .place_order(big.id, 1, &OrderBuyer::default(), flat, Utc::now())
            .unwrap();
        assert_eq!(placed.order.id, 1001);
    }

    #[test]
    fn test_price_uses_stock_at_transaction_start() {
        let storage = storage();
        let product = add_product(&storage, "a@farm.in", 10.0, 21);

        // 21 in stock -> moderate tier, even though 1 remains afterwards
        let placed = storage
            .place_order(product.id, 20, &OrderBuyer::default(), flat, Utc::now())
            .unwrap();
        assert_eq!(placed.order.unit_price, 13.0);

        // 1 in stock -> scarce tier
        let placed = storage
            .place_order(product.id, 1, &OrderBuyer::default(), flat, Utc::now())
            .unwrap();
        assert_eq!(placed.order.unit_price, 15.0);
    }

    #[test]
    fn test_farmer_orders_and_stats() {
        let storage = storage();
        let mine = add_product(&storage, "a@farm.in", 10.0, 50);
        let theirs = add_product(&storage, "b@farm.in", 10.0, 50);
        storage
            .place_order(mine.id, 1, &OrderBuyer::default(), flat, Utc::now())
            .unwrap();
        storage
            .place_order(theirs.id, 1, &OrderBuyer::default(), flat, Utc::now())
            .unwrap();

        let orders = storage.list_orders_by_farmer("a@farm.in").unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].product_id, mine.id);

        let stats = storage.stats().unwrap();
        assert_eq!(
            stats,
            StorageStats {
                users: 0,
                products: 2,
                orders: 2,
                ledger_entries: 2,
            }
        );
    }

    #[test]
    fn test_reopen_keeps_counters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("market.redb");
        {
            let storage = MarketStorage::open(&path).unwrap();
            let product = add_product(&storage, "a@farm.in", 10.0, 5);
            storage
                .place_order(product.id, 1, &OrderBuyer::default(), flat, Utc::now())
                .unwrap();
        }
        let storage = MarketStorage::open(&path).unwrap();
        assert_eq!(add_product(&storage, "a@farm.in", 10.0, 5).id, 2);
        let placed = storage
            .place_order(2, 1, &OrderBuyer::default(), flat, Utc::now())
            .unwrap();
        assert_eq!(placed.order.id, 1002);
        assert_eq!(storage.ledger_entries().unwrap().len(), 2);
    }
}
