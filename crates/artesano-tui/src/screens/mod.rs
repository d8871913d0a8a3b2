//! Screen implementations. Each screen is a top-level Component.

pub mod feedstocks;
pub mod home;
pub mod not_found;
pub mod products;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create every screen component. `route` is shown by the not-found page.
pub fn create_screens(
    feedstock_page_size: u32,
    product_page_size: u32,
    route: &str,
) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Home, Box::new(home::HomeScreen::new())),
        (
            ScreenId::Feedstocks,
            Box::new(feedstocks::FeedstocksScreen::new(feedstock_page_size)),
        ),
        (
            ScreenId::Products,
            Box::new(products::ProductsScreen::new(product_page_size)),
        ),
        (
            ScreenId::NotFound,
            Box::new(not_found::NotFoundScreen::new(route)),
        ),
    ]
}
