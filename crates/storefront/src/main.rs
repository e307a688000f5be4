use printshop_catalog::GalleryQuery;
use printshop_storefront::{Storefront, StorefrontConfig};

fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::from_env();
    printshop_observability::init_with_filter(&config.log_filter);

    let storefront = Storefront::open(&config)?;
    let view = storefront.gallery(&GalleryQuery::new());
    tracing::info!(
        prints = view.total,
        uploaded = storefront.products().uploaded().len(),
        edited = storefront.products().edited().len(),
        cart_items = storefront.cart().total_items(),
        "{}",
        view.summary()
    );

    Ok(())
}
