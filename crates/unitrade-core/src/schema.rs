//! # Relational Schema
//!
//! The MySQL schema the storefront mirrors, as text for the developer panel
//! and as a small model for the ER view.
//!
//! ```text
//!   users                          products
//!   ┌──────────────────┐   1   N   ┌──────────────────────┐
//!   │ PK id            │──────────►│ PK id                │
//!   │    username      │ has many  │ FK seller_id         │
//!   │    student_id    │           │    title, price, ... │
//!   └──────────────────┘           └──────────────────────┘
//! ```
//!
//! None of this is ever executed.

use serde::Serialize;
use std::fmt::Write as _;

/// Condensed DDL for the two tables.
pub const MYSQL_SCHEMA: &str = r#"
-- 用户表
CREATE TABLE users (
    id INT PRIMARY KEY AUTO_INCREMENT,
    username VARCHAR(50) NOT NULL,
    student_id VARCHAR(20) UNIQUE,
    major VARCHAR(100),
    join_date DATETIME DEFAULT CURRENT_TIMESTAMP
);

-- 商品表
CREATE TABLE products (
    id INT PRIMARY KEY AUTO_INCREMENT,
    seller_id INT,
    title VARCHAR(100) NOT NULL,
    description TEXT,
    price DECIMAL(10, 2) NOT NULL,
    original_price DECIMAL(10, 2),
    category ENUM('BOOKS', 'ELECTRONICS', 'LIFESTYLE', 'TRANSPORT', 'CLOTHING', 'OTHER'),
    status ENUM('ON_SALE', 'SOLD_OUT', 'RESERVED') DEFAULT 'ON_SALE',
    publish_date DATETIME DEFAULT CURRENT_TIMESTAMP,
    view_count INT DEFAULT 0,
    location VARCHAR(100),
    FOREIGN KEY (seller_id) REFERENCES users(id)
);
"#;

/// Complete initialization script: database, tables and demo rows.
pub const FULL_INIT_SQL: &str = r#"
SET NAMES utf8mb4;
SET FOREIGN_KEY_CHECKS = 0;

-- 1. Create Database
CREATE DATABASE IF NOT EXISTS unitrade_db CHARACTER SET utf8mb4;
USE unitrade_db;

-- 2. Table: Users
DROP TABLE IF EXISTS `users`;
CREATE TABLE `users` (
  `id` int NOT NULL AUTO_INCREMENT,
  `username` varchar(50) NOT NULL,
  `student_id` varchar(20) DEFAULT NULL,
  `major` varchar(100) DEFAULT NULL,
  `avatar` varchar(255) DEFAULT NULL,
  `join_date` datetime DEFAULT CURRENT_TIMESTAMP,
  PRIMARY KEY (`id`),
  UNIQUE KEY `uk_student_id` (`student_id`)
) ENGINE=InnoDB AUTO_INCREMENT=104 DEFAULT CHARSET=utf8mb4;

-- 3. Table: Products
DROP TABLE IF EXISTS `products`;
CREATE TABLE `products` (
  `id` int NOT NULL AUTO_INCREMENT,
  `seller_id` int NOT NULL,
  `title` varchar(100) NOT NULL,
  `description` text,
  `price` decimal(10,2) NOT NULL,
  `original_price` decimal(10,2) DEFAULT NULL,
  `category` enum('BOOKS','ELECTRONICS','LIFESTYLE','TRANSPORT','CLOTHING','OTHER') NOT NULL,
  `status` enum('ON_SALE','SOLD_OUT','RESERVED') DEFAULT 'ON_SALE',
  `images` text,
  `location` varchar(100) DEFAULT NULL,
  `view_count` int DEFAULT '0',
  `publish_date` datetime DEFAULT CURRENT_TIMESTAMP,
  PRIMARY KEY (`id`),
  KEY `fk_products_seller` (`seller_id`),
  CONSTRAINT `fk_products_seller` FOREIGN KEY (`seller_id`) REFERENCES `users` (`id`) ON DELETE CASCADE
) ENGINE=InnoDB AUTO_INCREMENT=4 DEFAULT CHARSET=utf8mb4;

-- 4. Insert Mock Users
INSERT INTO `users` (`id`, `username`, `student_id`, `major`, `avatar`, `join_date`) VALUES
(101, '隔壁老王_CS', '2023001', '网络空间安全', 'https://picsum.photos/seed/user101/100/100', '2023-09-01 10:00:00'),
(102, '王艺_Art', '2022055', '视觉传达', 'https://picsum.photos/seed/user102/100/100', '2023-09-15 14:30:00'),
(103, '张强_Sport', '2020112', '体育教育', 'https://picsum.photos/seed/user103/100/100', '2022-03-10 09:15:00');

-- 5. Insert Mock Products
INSERT INTO `products` (`id`, `seller_id`, `title`, `description`, `price`, `original_price`, `category`, `status`, `images`, `location`, `view_count`, `publish_date`) VALUES
(1, 102, 'iPad Air 5 (64G) + Apple Pencil', '考研结束出。屏幕无划痕，带类纸膜。送保护壳。适合记笔记和画画。', 3200.00, 4500.00, 'ELECTRONICS', 'ON_SALE', '["https://picsum.photos/seed/ipad/400/300"]', '图书馆门口', 156, '2024-05-10 08:00:00'),
(2, 103, '捷安特山地车 9成新', '大三学长毕业出车。刹车灵敏，变速顺滑。仅在校内骑行。', 600.00, 1200.00, 'TRANSPORT', 'ON_SALE', '["https://picsum.photos/seed/bike/400/300"]', '北区宿舍楼下', 89, '2024-05-12 18:20:00'),
(3, 102, '高等数学(第七版) 上下册', '期末复习必备，书内有详细笔记，重点已划。', 25.00, 88.00, 'BOOKS', 'SOLD_OUT', '["https://picsum.photos/seed/books/400/300"]', '二食堂', 45, '2024-05-01 12:00:00');

SET FOREIGN_KEY_CHECKS = 1;
"#;

// =============================================================================
// ER Model
// =============================================================================

/// Key role of a column in the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeyKind {
    Primary,
    Foreign,
}

impl KeyKind {
    pub const fn tag(&self) -> &'static str {
        match self {
            KeyKind::Primary => "PK",
            KeyKind::Foreign => "FK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub key: Option<KeyKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub name: &'static str,
    pub columns: &'static [Column],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub from: &'static str,
    pub from_column: &'static str,
    pub to: &'static str,
    pub to_column: &'static str,
    /// e.g. `1:N`
    pub cardinality: &'static str,
    pub label: &'static str,
}

const fn col(name: &'static str, sql_type: &'static str) -> Column {
    Column {
        name,
        sql_type,
        key: None,
    }
}

const fn key(name: &'static str, sql_type: &'static str, kind: KeyKind) -> Column {
    Column {
        name,
        sql_type,
        key: Some(kind),
    }
}

pub const USERS: Entity = Entity {
    name: "users",
    columns: &[
        key("id", "INT", KeyKind::Primary),
        col("username", "VARCHAR"),
        col("student_id", "VARCHAR"),
        col("major", "VARCHAR"),
        col("avatar", "VARCHAR"),
        col("join_date", "DATETIME"),
    ],
};

pub const PRODUCTS: Entity = Entity {
    name: "products",
    columns: &[
        key("id", "INT", KeyKind::Primary),
        key("seller_id", "INT", KeyKind::Foreign),
        col("title", "VARCHAR"),
        col("price", "DECIMAL"),
        col("category", "ENUM"),
        col("status", "ENUM"),
        col("publish_date", "DATETIME"),
    ],
};

pub const SELLS: Relationship = Relationship {
    from: "users",
    from_column: "id",
    to: "products",
    to_column: "seller_id",
    cardinality: "1:N",
    label: "has many",
};

/// The entities and relationship shown in the ER tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErDiagram {
    pub entities: [Entity; 2],
    pub relationship: Relationship,
}

impl ErDiagram {
    pub const fn market() -> Self {
        ErDiagram {
            entities: [USERS, PRODUCTS],
            relationship: SELLS,
        }
    }

    /// Plain-text rendering for a terminal.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for entity in &self.entities {
            let _ = writeln!(out, "┌─ {} ", entity.name);
            for column in entity.columns {
                let tag = column.key.map(|k| k.tag()).unwrap_or("  ");
                let _ = writeln!(out, "│ {tag} {:<14} {}", column.name, column.sql_type);
            }
            let _ = writeln!(out, "└─");
        }

        let rel = &self.relationship;
        let _ = writeln!(
            out,
            "{} ─({} {})─► {}",
            rel.from, rel.cardinality, rel.label, rel.to
        );
        let _ = writeln!(
            out,
            "{}.{} connects to {}.{}",
            rel.from, rel.from_column, rel.to, rel.to_column
        );
        let _ = write!(out, "One User can sell Many Products.");

        out
    }
}

impl Default for ErDiagram {
    fn default() -> Self {
        Self::market()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_script_covers_both_tables_and_seed_rows() {
        assert!(FULL_INIT_SQL.contains("CREATE DATABASE IF NOT EXISTS unitrade_db"));
        assert!(FULL_INIT_SQL.contains("CREATE TABLE `users`"));
        assert!(FULL_INIT_SQL.contains("CREATE TABLE `products`"));
        assert!(FULL_INIT_SQL.contains("(103, '张强_Sport'"));
        assert!(FULL_INIT_SQL.trim_end().ends_with("SET FOREIGN_KEY_CHECKS = 1;"));
    }

    #[test]
    fn test_schema_lists_every_category_code() {
        for category in crate::types::Category::ALL {
            assert!(MYSQL_SCHEMA.contains(&format!("'{}'", category.code())));
        }
    }

    #[test]
    fn test_er_model_keys() {
        let diagram = ErDiagram::market();
        let products = &diagram.entities[1];
        let fk: Vec<&str> = products
            .columns
            .iter()
            .filter(|c| c.key == Some(KeyKind::Foreign))
            .map(|c| c.name)
            .collect();
        assert_eq!(fk, vec!["seller_id"]);
        assert_eq!(diagram.entities[0].columns[0].key, Some(KeyKind::Primary));
    }

    #[test]
    fn test_er_render_mentions_relationship() {
        let text = ErDiagram::market().render();
        assert!(text.contains("users.id connects to products.seller_id"));
        assert!(text.contains("1:N has many"));
        assert!(text.contains("FK seller_id"));
    }
}
