//! Employee Service
//!
//! CRUD over employees with an audit entry appended after every successful
//! mutation. The two stores share no transaction: when the audit write fails
//! the relational change stays committed and the error is returned. A write
//! that touches no row is reported as not found and is not audited.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::audit::entity::{AuditAction, AuditLogEntry};
use crate::audit::store::AuditLogStore;
use crate::employee::entity::{Employee, EmployeeData};
use crate::employee::repository::EmployeeRepository;
use crate::shared::error::{Result, RhError};

const ENTITY: &str = "Employee";

#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
    audit: Arc<dyn AuditLogStore>,
}

impl EmployeeService {
    pub fn new(employees: Arc<dyn EmployeeRepository>, audit: Arc<dyn AuditLogStore>) -> Self {
        Self { employees, audit }
    }

    pub fn employees(&self) -> &Arc<dyn EmployeeRepository> {
        &self.employees
    }

    pub fn audit(&self) -> &Arc<dyn AuditLogStore> {
        &self.audit
    }

    /// Every employee. An empty store is reported as `NoRecords`.
    pub async fn list_all(&self) -> Result<Vec<Employee>> {
        let employees = self.employees.find_all().await?;
        if employees.is_empty() {
            return Err(RhError::no_records(ENTITY));
        }
        Ok(employees)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Employee> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| RhError::not_found(ENTITY, id))
    }

    /// Audit entries of an existing employee, in store order.
    pub async fn get_audit_log(&self, id: i32) -> Result<Vec<AuditLogEntry>> {
        self.get_by_id(id).await?;

        let entries = self
            .audit
            .find_by_partition(&AuditLogEntry::partition_for(id))
            .await?;
        debug!(employee_id = id, count = entries.len(), "Fetched audit log");

        if entries.is_empty() {
            return Err(RhError::not_found("AuditLog", id));
        }
        Ok(entries)
    }

    pub async fn create(&self, data: EmployeeData) -> Result<Employee> {
        let employee = self.employees.insert(&data).await.map_err(|e| {
            error!(error = %e, "Failed to insert employee");
            e
        })?;
        info!(employee_id = employee.id, "Employee created");

        self.record(&employee, AuditAction::Insertion).await?;
        Ok(employee)
    }

    /// Full replace of the mutable fields of an existing employee.
    pub async fn update(&self, id: i32, data: EmployeeData) -> Result<Employee> {
        let mut employee = self.get_by_id(id).await?;
        employee.apply(data);

        let updated = self.employees.update(&employee).await.map_err(|e| {
            error!(employee_id = id, error = %e, "Failed to update employee");
            e
        })?;
        if !updated {
            warn!(employee_id = id, "Employee vanished before update");
            return Err(RhError::not_found(ENTITY, id));
        }
        info!(employee_id = id, "Employee updated");

        self.record(&employee, AuditAction::Update).await?;
        Ok(employee)
    }

    /// Remove an employee; the audit entry carries the pre-deletion snapshot.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let employee = self.get_by_id(id).await?;

        let deleted = self.employees.delete(id).await.map_err(|e| {
            error!(employee_id = id, error = %e, "Failed to delete employee");
            e
        })?;
        if !deleted {
            warn!(employee_id = id, "Employee vanished before delete");
            return Err(RhError::not_found(ENTITY, id));
        }
        info!(employee_id = id, "Employee deleted");

        self.record(&employee, AuditAction::Removal).await
    }

    async fn record(&self, employee: &Employee, action: AuditAction) -> Result<()> {
        let entry = AuditLogEntry::new(employee, action);

        if let Err(e) = self.audit.upsert(&entry).await {
            // The relational write above is already committed.
            error!(
                employee_id = employee.id,
                action = %action,
                row_key = %entry.row_key,
                error = %e,
                "Failed to append audit entry"
            );
            return Err(e);
        }

        info!(
            employee_id = employee.id,
            action = %action,
            row_key = %entry.row_key,
            "Audit entry recorded"
        );
        Ok(())
    }
}
