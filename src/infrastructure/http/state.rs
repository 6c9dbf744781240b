//! Application State
//!
//! 示例 API 的共享只读状态

use serde::Serialize;

/// 目录条目
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub tags: Vec<String>,
}

impl Item {
    pub fn new(id: u32, name: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            id,
            name: name.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// 应用状态
pub struct AppState {
    pub catalog: Vec<Item>,
    /// 列表接口每页条数
    pub page_size: usize,
}

impl AppState {
    pub fn new(catalog: Vec<Item>, page_size: usize) -> Self {
        Self { catalog, page_size }
    }

    /// 内置示例目录
    pub fn with_sample_catalog(page_size: usize) -> Self {
        Self::new(sample_catalog(), page_size)
    }

    pub fn find_item(&self, id: u32) -> Option<&Item> {
        self.catalog.iter().find(|item| item.id == id)
    }
}

fn sample_catalog() -> Vec<Item> {
    vec![
        Item::new(1, "Salt & Pepper", &["kitchen"]),
        Item::new(2, "<Untitled>", &["draft"]),
        Item::new(3, "Cast Iron Pan", &["kitchen", "cookware"]),
        Item::new(4, "Chef's Knife", &["kitchen", "cutlery"]),
        Item::new(5, "Cutting Board", &["kitchen"]),
    ]
}
