//! Counters for the employee API, exported in Prometheus text format.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::fmt;
use tracing::{info, warn};

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Enum representing all metric names used by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    EmployeesCreated,
    EmployeesUpdated,
    EmployeesDeactivated,
    EmployeesReactivated,
    AddressesAdded,
    AddressesRemoved,
    RequestsRejected,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::EmployeesCreated => "employees_created_total",
            MetricName::EmployeesUpdated => "employees_updated_total",
            MetricName::EmployeesDeactivated => "employees_deactivated_total",
            MetricName::EmployeesReactivated => "employees_reactivated_total",
            MetricName::AddressesAdded => "employee_addresses_added_total",
            MetricName::AddressesRemoved => "employee_addresses_removed_total",
            MetricName::RequestsRejected => "employee_requests_rejected_total",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MetricName::EmployeesCreated => "Employees created",
            MetricName::EmployeesUpdated => "Employee records updated",
            MetricName::EmployeesDeactivated => "Employees soft-deleted",
            MetricName::EmployeesReactivated => "Soft-deleted employees reactivated",
            MetricName::AddressesAdded => "Addresses added to employees",
            MetricName::AddressesRemoved => "Addresses removed from employees",
            MetricName::RequestsRejected => "Requests rejected, labelled by error code",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            EmployeesCreated,
            EmployeesUpdated,
            EmployeesDeactivated,
            EmployeesReactivated,
            AddressesAdded,
            AddressesRemoved,
            RequestsRejected,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Install the Prometheus recorder once per process and return its handle.
///
/// Later calls reuse the first handle. Returns `None` if another recorder
/// already owns the global slot.
pub fn init_metrics() -> Option<PrometheusHandle> {
    HANDLE
        .get_or_try_init(|| {
            let handle = PrometheusBuilder::new().install_recorder()?;
            for name in MetricName::all_metrics() {
                metrics::describe_counter!(name.as_str(), name.description());
            }
            info!("Prometheus recorder installed");
            Ok::<_, metrics_exporter_prometheus::BuildError>(handle)
        })
        .map_err(|e| warn!("Failed to install Prometheus recorder: {}", e))
        .ok()
        .cloned()
}

pub fn increment(name: MetricName) {
    metrics::counter!(name.as_str()).increment(1);
}

pub fn rejected(code: &str) {
    metrics::counter!(MetricName::RequestsRejected.as_str(), "code" => code.to_string()).increment(1);
}
