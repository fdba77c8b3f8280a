//! Catalog texts shown to customers
//!
//! The price list is owned by whoever runs the desk; the built-in texts are
//! only a default.

use std::path::Path;

const DEFAULT_PRICE_LIST: &str = "📋 Наш прайс-лист:

🍕 Пиццы:
• Маргарита - 550₽
• Пепперони - 650₽
• Гавайская - 600₽

🍔 Бургеры:
• Классический - 350₽
• Чизбургер - 400₽
• Двойной - 500₽

🥗 Салаты:
• Цезарь - 300₽
• Греческий - 280₽

🥤 Напитки:
• Coca-Cola - 150₽
• Fanta - 150₽
• Вода - 100₽

💵 Минимальный заказ: 500₽
🚚 Доставка: бесплатно от 1000₽";

const DEFAULT_PRODUCT_MENU: &str = "• Пицца Маргарита - 550₽
• Пицца Пепперони - 650₽
• Бургер Классический - 350₽
• Салат Цезарь - 300₽
• Напиток Coca-Cola - 150₽";

/// Price list plus the short product list used in the order prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    price_list: String,
    product_menu: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_LIST, DEFAULT_PRODUCT_MENU)
    }
}

impl Catalog {
    pub fn new(price_list: impl Into<String>, product_menu: impl Into<String>) -> Self {
        Self {
            price_list: price_list.into(),
            product_menu: product_menu.into(),
        }
    }

    /// Replace the price list with the contents of a text file
    pub fn with_price_list_file(mut self, path: impl AsRef<Path>) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        self.price_list = text.trim_end().to_string();
        Ok(self)
    }

    pub fn price_list(&self) -> &str {
        &self.price_list
    }

    pub fn product_menu(&self) -> &str {
        &self.product_menu
    }
}
