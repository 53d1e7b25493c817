//! Employee registry

use super::{BusinessError, BusinessStore};
use crate::core::business::ids::EMPLOYEE_PREFIX;
use crate::core::models::{Employee, EmployeeStatus};
use crate::core::storage::{KeyValueStore, StorageKey};

impl<S: KeyValueStore> BusinessStore<S> {
    /// All employees, in the order they were added
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Employee by id
    #[must_use]
    pub fn employee(&self, employee_id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == employee_id)
    }

    /// First employee whose email matches, ignoring case and surrounding whitespace
    #[must_use]
    pub fn employee_by_email(&self, email: &str) -> Option<&Employee> {
        let email = email.trim();
        self.employees
            .iter()
            .find(|e| e.email.trim().eq_ignore_ascii_case(email))
    }

    /// Add an invited employee with no assigned courses. Emails are not
    /// required to be unique.
    ///
    /// # Errors
    /// Returns [`BusinessError::Storage`] if the write fails
    pub fn add_employee(&mut self, name: &str, email: &str) -> Result<Employee, BusinessError> {
        let now = self.clock.now();
        let id = self.ids.next(EMPLOYEE_PREFIX, now);
        let employee = Employee::invited(id, name.trim().to_string(), email.trim().to_string(), now);

        let mut employees = self.employees.clone();
        employees.push(employee.clone());
        self.persist(StorageKey::Employees, &employees)?;
        self.employees = employees;

        crate::info!("Added employee {} ({})", employee.id, employee.email);
        Ok(employee)
    }

    /// Set an employee's status. Any status may follow any other.
    ///
    /// # Errors
    /// Returns [`BusinessError::EmployeeNotFound`] for an unknown id, or
    /// [`BusinessError::Storage`] if the write fails
    pub fn update_employee_status(
        &mut self,
        employee_id: &str,
        status: EmployeeStatus,
    ) -> Result<(), BusinessError> {
        self.update_employee(employee_id, |employee| {
            let changed = employee.status != status;
            employee.status = status;
            changed
        })?;
        crate::debug!("Employee {} is now {}", employee_id, status);
        Ok(())
    }

    /// Assign a catalog course. Returns `false` if it was already assigned.
    ///
    /// # Errors
    /// Returns [`BusinessError::CourseNotFound`] if the course is not in the
    /// catalog, [`BusinessError::EmployeeNotFound`] for an unknown employee, or
    /// [`BusinessError::Storage`] if the write fails
    pub fn assign_course(&mut self, employee_id: &str, course_id: &str) -> Result<bool, BusinessError> {
        self.course(course_id)?;
        self.update_employee(employee_id, |employee| employee.assign(course_id))
    }

    /// Remove a course assignment. Returns `false` if it was not assigned.
    ///
    /// # Errors
    /// Returns [`BusinessError::EmployeeNotFound`] for an unknown employee, or
    /// [`BusinessError::Storage`] if the write fails
    pub fn unassign_course(&mut self, employee_id: &str, course_id: &str) -> Result<bool, BusinessError> {
        self.update_employee(employee_id, |employee| employee.unassign(course_id))
    }

    /// Apply `change` to a copy of the employee list and persist it if
    /// `change` reports a modification
    fn update_employee<F>(&mut self, employee_id: &str, change: F) -> Result<bool, BusinessError>
    where
        F: FnOnce(&mut Employee) -> bool,
    {
        let mut employees = self.employees.clone();
        let employee = employees
            .iter_mut()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| BusinessError::EmployeeNotFound(employee_id.to_string()))?;

        if !change(employee) {
            return Ok(false);
        }
        self.persist(StorageKey::Employees, &employees)?;
        self.employees = employees;
        Ok(true)
    }
}
