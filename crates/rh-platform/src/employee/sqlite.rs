//! SQLite Employee Repository
//!
//! SQLite has no decimal type, so salary is kept as its canonical decimal
//! string, rounded to the same two places as the PostgreSQL column. Admission dates use sqlx's chrono TEXT encoding.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::{debug, info};

use crate::employee::entity::{salary, Employee, EmployeeData};
use crate::employee::repository::{EmployeeRepository, EMPLOYEE_TABLE};
use crate::shared::error::{Result, RhError};

pub struct SqliteEmployeeRepository {
    pool: SqlitePool,
}

impl SqliteEmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn parse_row(row: &SqliteRow) -> Result<Employee> {
        let id: i64 = row.try_get("id")?;
        let salary: String = row.try_get("salary")?;
        let admission_date: NaiveDateTime = row.try_get("admission_date")?;

        Ok(Employee {
            id: i32::try_from(id)
                .map_err(|_| RhError::invalid_data(format!("employee id out of range: {id}")))?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            salary: Decimal::from_str(&salary).map_err(|e| {
                RhError::invalid_data(format!("salary '{salary}' of employee {id}: {e}"))
            })?,
            department: row.try_get("department")?,
            admission_date,
        })
    }
}

#[async_trait]
impl EmployeeRepository for SqliteEmployeeRepository {
    async fn init_schema(&self) -> Result<()> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                address TEXT NOT NULL,
                salary TEXT NOT NULL,
                department TEXT NOT NULL,
                admission_date TEXT NOT NULL
            )
            "#,
            EMPLOYEE_TABLE
        );
        sqlx::query(&query).execute(&self.pool).await?;

        info!(table = EMPLOYEE_TABLE, "SQLite employee schema ready");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Employee>> {
        let query = format!(
            "SELECT id, name, address, salary, department, admission_date FROM {} ORDER BY id",
            EMPLOYEE_TABLE
        );
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        let mut employees = Vec::with_capacity(rows.len());
        for row in &rows {
            employees.push(Self::parse_row(row)?);
        }

        debug!(count = employees.len(), "Fetched all employees");
        Ok(employees)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>> {
        let query = format!(
            "SELECT id, name, address, salary, department, admission_date FROM {} WHERE id = ?",
            EMPLOYEE_TABLE
        );
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::parse_row).transpose()
    }

    async fn insert(&self, data: &EmployeeData) -> Result<Employee> {
        let query = format!(
            "INSERT INTO {} (name, address, salary, department, admission_date) VALUES (?, ?, ?, ?, ?)",
            EMPLOYEE_TABLE
        );
        let result = sqlx::query(&query)
            .bind(&data.name)
            .bind(&data.address)
            .bind(salary::normalize(data.salary).to_string())
            .bind(&data.department)
            .bind(data.admission_date)
            .execute(&self.pool)
            .await?;

        let rowid = result.last_insert_rowid();
        let id = i32::try_from(rowid)
            .map_err(|_| RhError::invalid_data(format!("employee id out of range: {rowid}")))?;

        Ok(Employee::from_data(id, data.clone()))
    }

    async fn update(&self, employee: &Employee) -> Result<bool> {
        let query = format!(
            "UPDATE {} SET name = ?, address = ?, salary = ?, department = ?, admission_date = ? WHERE id = ?",
            EMPLOYEE_TABLE
        );
        let result = sqlx::query(&query)
            .bind(&employee.name)
            .bind(&employee.address)
            .bind(salary::normalize(employee.salary).to_string())
            .bind(&employee.department)
            .bind(employee.admission_date)
            .bind(employee.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let query = format!("DELETE FROM {} WHERE id = ?", EMPLOYEE_TABLE);
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
