pub mod database;
pub mod entity;
pub mod mysql_users_repository;
