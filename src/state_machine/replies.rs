//! Commands the bot recognizes and the texts it answers with

use crate::catalog::Catalog;
use crate::orders::Order;
use chrono::Local;
use std::fmt::Write;

#[allow(dead_code)] // Falls through to the welcome reply like any other text
pub const CMD_START: &str = "/start";
pub const CMD_PRICE_LIST: &str = "📋 Прайс";
pub const CMD_NEW_ORDER: &str = "🛒 Сделать заказ";

pub const WELCOME: &str = "🍕 Добро пожаловать в сервис заказов!\n\nВыберите действие:";
pub const QUANTITY_PROMPT: &str = "Введите количество:";
pub const QUANTITY_RETRY: &str = "Пожалуйста, введите корректное количество (число больше 0):";
pub const ADDRESS_PROMPT: &str = "Введите адрес доставки:";
pub const PHONE_PROMPT: &str = "Введите ваш номер телефона для связи:";

/// Local time format used in dispatcher notifications
const NOTIFICATION_TIME_FORMAT: &str = "%H:%M %d.%m.%Y";

pub fn product_prompt(catalog: &Catalog) -> String {
    format!(
        "Что вы хотите заказать? Опишите продукт:\n\n{}",
        catalog.product_menu()
    )
}

pub fn order_confirmation(order: &Order) -> String {
    let mut text = format!(
        "✅ Ваш заказ принят!\n\nНомер заказа: {}\nПродукт: {}\n",
        order.id, order.product
    );
    if let Some(quantity) = order.quantity {
        let _ = writeln!(text, "Количество: {quantity}");
    }
    let _ = write!(
        text,
        "Адрес: {}\nТелефон: {}\n\n\
         Ваш заказ направлен диспетчеру. С вами свяжутся в ближайшее время для подтверждения.",
        order.address, order.phone
    );
    text
}

pub fn dispatcher_notification(order: &Order) -> String {
    let mut text = format!(
        "🚨 НОВЫЙ ЗАКАЗ!\n\nНомер: {}\nКлиент: {}\nТовар: {}\n",
        order.id, order.display_name, order.product
    );
    if let Some(quantity) = order.quantity {
        let _ = writeln!(text, "Количество: {quantity}");
    }
    let _ = write!(
        text,
        "Адрес: {}\nТелефон: {}\nВремя: {}",
        order.address,
        order.phone,
        order
            .created_at
            .with_timezone(&Local)
            .format(NOTIFICATION_TIME_FORMAT)
    );
    text
}
