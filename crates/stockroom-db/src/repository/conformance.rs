//! Contract checks shared by every repository backend.
//!
//! Each backend's test module calls [`run_all`] with a factory that yields a
//! fresh, empty store.

use std::future::Future;

use stockroom_core::{Money, NewProduct, ProductPatch};

use super::ProductRepository;
use crate::error::DbError;

fn widget(stock: i64) -> NewProduct {
    NewProduct::new("Widget", Money::from_cents(999), stock)
}

pub(crate) async fn run_all<F, Fut, R>(make: F)
where
    F: Fn() -> Fut,
    Fut: Future<Output = R>,
    R: ProductRepository,
{
    ids_are_never_reused(&mut make().await).await;
    get_after_create_matches(&mut make().await).await;
    update_changes_only_supplied_fields(&mut make().await).await;
    update_unknown_id_returns_none(&mut make().await).await;
    delete_semantics(&mut make().await).await;
    low_stock_is_exact_subset(&mut make().await).await;
    list_is_ascending_id(&mut make().await).await;
    invalid_records_are_rejected(&mut make().await).await;
    widget_lifecycle(&mut make().await).await;
}

async fn ids_are_never_reused(repo: &mut dyn ProductRepository) {
    let a = repo.create(widget(1)).await.unwrap();
    let b = repo.create(widget(2)).await.unwrap();
    assert_ne!(a.id, b.id);

    assert!(repo.delete(b.id).await.unwrap());
    let c = repo.create(widget(3)).await.unwrap();
    assert!(c.id > b.id, "id {} reused after delete", c.id);

    assert!(repo.delete(a.id).await.unwrap());
    let d = repo.create(widget(4)).await.unwrap();
    assert!(d.id > c.id);
}

async fn get_after_create_matches(repo: &mut dyn ProductRepository) {
    let created = repo
        .create(NewProduct::new("Teclado", Money::from_cents(4550), 12))
        .await
        .unwrap();

    let fetched = repo.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Teclado");
    assert_eq!(fetched.price.cents(), 4550);
    assert_eq!(fetched.stock, 12);
}

async fn update_changes_only_supplied_fields(repo: &mut dyn ProductRepository) {
    let p = repo
        .create(NewProduct::new("X", Money::from_cents(1000), 5))
        .await
        .unwrap();

    let updated = repo
        .update(p.id, ProductPatch::default().with_stock(2))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, p.id);
    assert_eq!(updated.name, "X");
    assert_eq!(updated.price.cents(), 1000);
    assert_eq!(updated.stock, 2);

    let renamed = repo
        .update(p.id, ProductPatch::default().with_name("Y"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "Y");
    assert_eq!(renamed.stock, 2);

    // An empty patch is a no-op that still reports the product.
    let same = repo
        .update(p.id, ProductPatch::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(same, renamed);
    assert_eq!(repo.get(p.id).await.unwrap(), Some(renamed));
}

async fn update_unknown_id_returns_none(repo: &mut dyn ProductRepository) {
    let p = repo.create(widget(1)).await.unwrap();
    let result = repo
        .update(p.id + 100, ProductPatch::default().with_stock(9))
        .await
        .unwrap();
    assert!(result.is_none());
    assert_eq!(repo.list().await.unwrap(), vec![p]);
}

async fn delete_semantics(repo: &mut dyn ProductRepository) {
    let p = repo.create(widget(1)).await.unwrap();
    let before = repo.list().await.unwrap();

    assert!(!repo.delete(p.id + 100).await.unwrap());
    assert_eq!(repo.list().await.unwrap(), before);

    assert!(repo.delete(p.id).await.unwrap());
    assert!(repo.get(p.id).await.unwrap().is_none());
    assert!(!repo.delete(p.id).await.unwrap());
}

async fn low_stock_is_exact_subset(repo: &mut dyn ProductRepository) {
    for stock in [12, 5, 0, 6, 3] {
        repo.create(widget(stock)).await.unwrap();
    }

    let low = repo.low_stock().await.unwrap();
    let stocks: Vec<i64> = low.iter().map(|p| p.stock).collect();
    assert_eq!(stocks, vec![0, 3, 5]);

    // Ties on stock fall back to id order.
    let tie = repo.create(widget(3)).await.unwrap();
    let low = repo.low_stock().await.unwrap();
    let stocks: Vec<i64> = low.iter().map(|p| p.stock).collect();
    assert_eq!(stocks, vec![0, 3, 3, 5]);
    assert_eq!(low[2].id, tie.id);
}

async fn list_is_ascending_id(repo: &mut dyn ProductRepository) {
    assert!(repo.list().await.unwrap().is_empty());

    for stock in [7, 1, 4] {
        repo.create(widget(stock)).await.unwrap();
    }
    let ids: Vec<_> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert_eq!(ids.len(), 3);
}

async fn invalid_records_are_rejected(repo: &mut dyn ProductRepository) {
    let err = repo.create(widget(-1)).await.unwrap_err();
    assert!(matches!(err, DbError::Invalid(_)));

    let err = repo
        .create(NewProduct::new("  ", Money::from_cents(1), 1))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Invalid(_)));
    assert!(repo.list().await.unwrap().is_empty());

    let p = repo.create(widget(1)).await.unwrap();
    let err = repo
        .update(p.id, ProductPatch::default().with_price(Money::from_cents(-1)))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Invalid(_)));
    assert_eq!(repo.get(p.id).await.unwrap(), Some(p));
}

async fn widget_lifecycle(repo: &mut dyn ProductRepository) {
    let created = repo.create(widget(3)).await.unwrap();
    let n = created.id;

    let fetched = repo.get(n).await.unwrap().unwrap();
    assert_eq!((fetched.name.as_str(), fetched.price.cents(), fetched.stock), ("Widget", 999, 3));

    let updated = repo
        .update(n, ProductPatch::default().with_stock(0))
        .await
        .unwrap()
        .unwrap();
    assert_eq!((updated.name.as_str(), updated.price.cents(), updated.stock), ("Widget", 999, 0));

    assert!(repo.low_stock().await.unwrap().iter().any(|p| p.id == n));
    assert!(repo.delete(n).await.unwrap());
    assert!(repo.get(n).await.unwrap().is_none());
}
