//! Employee Aggregate
//!
//! Employee records in the relational store, the service that audits every
//! mutation and the `/Funcionario` API.

pub mod api;
pub mod entity;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod sqlite;

pub use api::{employees_router, EmployeesState};
pub use entity::{Employee, EmployeeData};
pub use postgres::PostgresEmployeeRepository;
pub use repository::{EmployeeRepository, EMPLOYEE_TABLE};
pub use service::EmployeeService;
pub use sqlite::SqliteEmployeeRepository;
