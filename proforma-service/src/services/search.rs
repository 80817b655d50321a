//! Case-insensitive substring filters and summaries for list endpoints.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::models::{Client, Invoice, Item, Vendor};

/// Records that can be matched against a free-text query.
pub trait Searchable {
    /// Text fields a query is matched against.
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Searchable for Client {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.city.as_str(),
        ]
    }
}

impl Searchable for Vendor {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.city.as_str(),
        ];
        fields.extend(self.business_type.as_deref());
        fields
    }
}

impl Searchable for Item {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.sku.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.vendor_name.as_deref());
        fields
    }
}

impl Searchable for Invoice {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.customer_name.as_str(), self.proforma_no.as_str()]
    }
}

fn normalize(query: Option<&str>) -> Option<String> {
    query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty())
}

/// Keep the records matching `query`. A missing or blank query keeps all.
pub fn filter<T: Searchable>(records: Vec<T>, query: Option<&str>) -> Vec<T> {
    match normalize(query) {
        Some(needle) => records.into_iter().filter(|r| r.matches(&needle)).collect(),
        None => records,
    }
}

/// Exact category filter; blank or `all` keeps every item.
pub fn filter_category(items: Vec<Item>, category: Option<&str>) -> Vec<Item> {
    match category.map(str::trim) {
        Some(category) if !category.is_empty() && !category.eq_ignore_ascii_case("all") => items
            .into_iter()
            .filter(|item| item.category == category)
            .collect(),
        _ => items,
    }
}

pub fn low_stock_count(items: &[Item]) -> usize {
    items.iter().filter(|item| item.is_low_stock()).count()
}

/// Total value of stock on hand at cost.
pub fn inventory_value(items: &[Item]) -> Decimal {
    items.iter().map(Item::stock_value).sum()
}

/// Distinct item categories in sorted order.
pub fn categories(items: &[Item]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// First day of `day`'s month and first day of the following month.
pub fn month_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = day.with_day(1).unwrap_or(day);
    let end = start
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Invoices dated in the same calendar month as `day`.
pub fn issued_in_month(invoices: &[Invoice], day: NaiveDate) -> usize {
    let (start, end) = month_bounds(day);
    invoices
        .iter()
        .filter(|invoice| invoice.invoice_date >= start && invoice.invoice_date < end)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::demo::DemoStore;

    #[test]
    fn client_search_covers_name_email_phone_and_city() {
        let clients = DemoStore::new().clients();
        assert_eq!(filter(clients.clone(), Some("HESU")).len(), 1);
        assert_eq!(filter(clients.clone(), Some("hesu.co.tz")).len(), 1);
        assert_eq!(filter(clients.clone(), Some("+255 123")).len(), 1);
        assert_eq!(filter(clients.clone(), Some("dar es")).len(), 1);
        assert!(filter(clients, Some("nairobi")).is_empty());
    }

    #[test]
    fn blank_query_keeps_everything() {
        let items = DemoStore::new().items();
        assert_eq!(filter(items.clone(), None).len(), items.len());
        assert_eq!(filter(items.clone(), Some("   ")).len(), items.len());
    }

    #[test]
    fn item_search_includes_vendor_name_and_description() {
        let items = DemoStore::new().items();
        assert_eq!(filter(items.clone(), Some("tech supplies")).len(), 2);
        assert_eq!(filter(items.clone(), Some("151a compatible")).len(), 1);
        assert_eq!(filter(items, Some("TON-106A")).len(), 1);
    }

    #[test]
    fn vendor_search_includes_business_type() {
        let vendors = DemoStore::new().vendors();
        assert_eq!(filter(vendors, Some("technology")).len(), 1);
    }

    #[test]
    fn invoice_search_matches_proforma_number() {
        let invoices = DemoStore::new().invoices();
        assert_eq!(filter(invoices.clone(), Some("152")).len(), 1);
        assert!(filter(invoices, Some("999")).is_empty());
    }

    #[test]
    fn category_filter_is_exact() {
        let items = DemoStore::new().items();
        assert_eq!(filter_category(items.clone(), Some("Office Supplies")).len(), 2);
        assert_eq!(filter_category(items.clone(), Some("all")).len(), 2);
        assert!(filter_category(items, Some("Office")).is_empty());
    }

    #[test]
    fn stock_summaries() {
        let mut items = DemoStore::new().items();
        assert_eq!(low_stock_count(&items), 0);
        // 50 * 120000 + 30 * 250000
        assert_eq!(inventory_value(&items), Decimal::from(13_500_000));

        items[0].stock_quantity = 3;
        assert_eq!(low_stock_count(&items), 1);
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        let mut items = DemoStore::new().items();
        assert_eq!(categories(&items), vec!["Office Supplies".to_string()]);

        items[0].category = "Electronics".to_string();
        items.push(items[1].clone());
        assert_eq!(
            categories(&items),
            vec!["Electronics".to_string(), "Office Supplies".to_string()]
        );
        assert!(categories(&[]).is_empty());
    }

    #[test]
    fn month_bounds_cover_the_calendar_month() {
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(month_bounds(day(2025, 1, 27)), (day(2025, 1, 1), day(2025, 2, 1)));
        assert_eq!(month_bounds(day(2024, 12, 31)), (day(2024, 12, 1), day(2025, 1, 1)));
    }

    #[test]
    fn invoices_are_counted_by_invoice_month() {
        let invoices = DemoStore::new().invoices();
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        // The sample invoice is dated 27 January 2025.
        assert_eq!(issued_in_month(&invoices, day(2025, 1, 1)), 1);
        assert_eq!(issued_in_month(&invoices, day(2025, 1, 31)), 1);
        assert_eq!(issued_in_month(&invoices, day(2025, 2, 1)), 0);
        assert_eq!(issued_in_month(&invoices, day(2024, 1, 27)), 0);
    }
}
