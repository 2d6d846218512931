//! Demo users and listings loaded at startup.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::money::Money;
use crate::types::{Category, ItemStatus, Listing, User};

/// The signed-in demo user.
pub const CURRENT_USER_ID: i64 = 101;

/// Read-only user reference data keyed by id.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: BTreeMap<i64, User>,
}

impl UserDirectory {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        UserDirectory {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }

    pub fn get(&self, id: i64) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.users.contains_key(&id)
    }

    /// Users in id order.
    pub fn iter(&self) -> impl Iterator<Item = &User> + '_ {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn avatar(id: i64) -> String {
    format!("https://picsum.photos/seed/user{id}/100/100")
}

fn cover(seed: &str) -> Vec<String> {
    vec![format!("https://picsum.photos/seed/{seed}/400/300")]
}

pub fn demo_users() -> UserDirectory {
    UserDirectory::new([
        User {
            id: 101,
            username: "隔壁老王_CS".into(),
            avatar: avatar(101),
            student_id: "2023001".into(),
            major: "网络空间安全".into(),
            join_date: date(2023, 9, 1),
        },
        User {
            id: 102,
            username: "王艺_Art".into(),
            avatar: avatar(102),
            student_id: "2022055".into(),
            major: "视觉传达".into(),
            join_date: date(2023, 9, 15),
        },
        User {
            id: 103,
            username: "张强_Sport".into(),
            avatar: avatar(103),
            student_id: "2020112".into(),
            major: "体育教育".into(),
            join_date: date(2022, 3, 10),
        },
    ])
}

/// The three starter listings, ids 1..=3 in that order.
pub fn demo_listings() -> Vec<Listing> {
    vec![
        Listing {
            id: 1,
            seller_id: 102,
            title: "iPad Air 5 (64G) + Apple Pencil".into(),
            description: "考研结束出。屏幕无划痕，带类纸膜。送保护壳。适合记笔记和画画。".into(),
            price: Money::from_yuan(3200),
            original_price: Money::from_yuan(4500),
            category: Category::Electronics,
            images: cover("ipad"),
            status: ItemStatus::Available,
            publish_date: date(2024, 5, 10),
            view_count: 156,
            location: "图书馆门口".into(),
        },
        Listing {
            id: 2,
            seller_id: 103,
            title: "捷安特山地车 9成新".into(),
            description: "大三学长毕业出车。刹车灵敏，变速顺滑。仅在校内骑行。".into(),
            price: Money::from_yuan(600),
            original_price: Money::from_yuan(1200),
            category: Category::Transport,
            images: cover("bike"),
            status: ItemStatus::Available,
            publish_date: date(2024, 5, 12),
            view_count: 89,
            location: "北区宿舍楼下".into(),
        },
        Listing {
            id: 3,
            seller_id: 102,
            title: "高等数学(第七版) 上下册".into(),
            description: "期末复习必备，书内有详细笔记，重点已划。".into(),
            price: Money::from_yuan(25),
            original_price: Money::from_yuan(88),
            category: Category::Books,
            images: cover("books"),
            status: ItemStatus::Sold,
            publish_date: date(2024, 5, 1),
            view_count: 45,
            location: "二食堂".into(),
        },
    ]
}
