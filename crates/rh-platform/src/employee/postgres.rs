//! PostgreSQL Employee Repository

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::{debug, info};

use crate::employee::entity::{salary, Employee, EmployeeData};
use crate::employee::repository::{EmployeeRepository, EMPLOYEE_TABLE};
use crate::shared::error::Result;

pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn parse_row(row: &PgRow) -> Result<Employee> {
        Ok(Employee {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            salary: row.try_get("salary")?,
            department: row.try_get("department")?,
            admission_date: row.try_get("admission_date")?,
        })
    }
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    async fn init_schema(&self) -> Result<()> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id SERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                address TEXT NOT NULL,
                salary NUMERIC(18, 2) NOT NULL,
                department TEXT NOT NULL,
                admission_date TIMESTAMP NOT NULL
            )
            "#,
            EMPLOYEE_TABLE
        );
        sqlx::query(&query).execute(&self.pool).await?;

        info!(table = EMPLOYEE_TABLE, "PostgreSQL employee schema ready");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Employee>> {
        let query = format!(
            "SELECT id, name, address, salary, department, admission_date FROM {} ORDER BY id",
            EMPLOYEE_TABLE
        );
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        let employees = rows.iter().map(Self::parse_row).collect::<Result<Vec<_>>>()?;

        debug!(count = employees.len(), "Fetched all employees");
        Ok(employees)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>> {
        let query = format!(
            "SELECT id, name, address, salary, department, admission_date FROM {} WHERE id = $1",
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
            "INSERT INTO {} (name, address, salary, department, admission_date) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, name, address, salary, department, admission_date",
            EMPLOYEE_TABLE
        );
        let row = sqlx::query(&query)
            .bind(&data.name)
            .bind(&data.address)
            .bind(salary::normalize(data.salary))
            .bind(&data.department)
            .bind(data.admission_date)
            .fetch_one(&self.pool)
            .await?;

        Self::parse_row(&row)
    }

    async fn update(&self, employee: &Employee) -> Result<bool> {
        let query = format!(
            "UPDATE {} SET name = $1, address = $2, salary = $3, department = $4, admission_date = $5 \
             WHERE id = $6",
            EMPLOYEE_TABLE
        );
        let result = sqlx::query(&query)
            .bind(&employee.name)
            .bind(&employee.address)
            .bind(salary::normalize(employee.salary))
            .bind(&employee.department)
            .bind(employee.admission_date)
            .bind(employee.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let query = format!("DELETE FROM {} WHERE id = $1", EMPLOYEE_TABLE);
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
