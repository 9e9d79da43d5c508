use diesel::prelude::*;

use crate::schema::stocks;

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = stocks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Stock {
    pub stockid: i64,
    pub name: String,
    pub price: f64,
    pub company: String,
}

/// 插入与整行更新共用：除主键外的全部字段
#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = stocks)]
pub struct NewStock {
    pub name: String,
    pub price: f64,
    pub company: String,
}
