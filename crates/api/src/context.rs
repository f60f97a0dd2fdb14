use stockroom_core::EmployeeId;

/// Authenticated employee for a request.
///
/// Inserted by the auth middleware; present on every `/api` route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    employee_id: EmployeeId,
    unique_employee_id: String,
}

impl SessionContext {
    pub fn new(employee_id: EmployeeId, unique_employee_id: impl Into<String>) -> Self {
        Self {
            employee_id,
            unique_employee_id: unique_employee_id.into(),
        }
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn unique_employee_id(&self) -> &str {
        &self.unique_employee_id
    }
}
