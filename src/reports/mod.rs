//! Aggregate analytical queries over the row store.
//!
//! Both reports read the employees table joined against the two
//! reference tables by id. Unknown reference ids keep their rows in the
//! result with a null name, matching left-join semantics.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use serde::Serialize;

use crate::model::{Employee, Record};
use crate::schema::Table;
use crate::store::RowStore;

/// Hire counts for one (department, job) pair, split by quarter.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuarterlyHires {
    pub department: Option<String>,
    pub job: Option<String>,
    pub q1: u64,
    pub q2: u64,
    pub q3: u64,
    pub q4: u64,
}

/// A department that hired above the yearly mean.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DepartmentAboveMean {
    pub id: f64,
    pub department: Option<String>,
    pub hired: u64,
}

/// Employees hired in `year`, counted per (department, job) and quarter,
/// ordered by department then job (nulls first).
pub fn hires_by_quarter(store: &RowStore, year: i32) -> Vec<QuarterlyHires> {
    let departments = name_index(store, Table::Departments);
    let jobs = name_index(store, Table::Jobs);

    let mut counts: BTreeMap<(Option<String>, Option<String>), [u64; 4]> = BTreeMap::new();
    for employee in employees(store) {
        if employee.hired_at.year() != year {
            continue;
        }
        let quarter = (employee.hired_at.month0() / 3) as usize;
        let department = departments.get(&employee.department_id.to_bits()).cloned();
        let job = jobs.get(&employee.job_id.to_bits()).cloned();
        counts.entry((department, job)).or_default()[quarter] += 1;
    }

    counts
        .into_iter()
        .map(|((department, job), q)| QuarterlyHires {
            department,
            job,
            q1: q[0],
            q2: q[1],
            q3: q[2],
            q4: q[3],
        })
        .collect()
}

/// Departments whose all-time hire count exceeds the mean of
/// per-department hires in `year`, ordered by hire count descending.
/// With no hires in `year` the mean is undefined and the result is
/// empty.
pub fn departments_above_mean(store: &RowStore, year: i32) -> Vec<DepartmentAboveMean> {
    let all = employees(store);

    let mut year_counts: HashMap<u64, u64> = HashMap::new();
    for employee in &all {
        if employee.hired_at.year() == year {
            *year_counts.entry(employee.department_id.to_bits()).or_default() += 1;
        }
    }
    if year_counts.is_empty() {
        return Vec::new();
    }
    let mean = year_counts.values().sum::<u64>() as f64 / year_counts.len() as f64;

    let mut totals: HashMap<u64, u64> = HashMap::new();
    for employee in &all {
        *totals.entry(employee.department_id.to_bits()).or_default() += 1;
    }

    let departments = name_index(store, Table::Departments);
    let mut result: Vec<DepartmentAboveMean> = totals
        .into_iter()
        .filter(|(_, hired)| *hired as f64 > mean)
        .map(|(bits, hired)| DepartmentAboveMean {
            id: f64::from_bits(bits),
            department: departments.get(&bits).cloned(),
            hired,
        })
        .collect();

    result.sort_by(|a, b| {
        b.hired
            .cmp(&a.hired)
            .then(a.id.partial_cmp(&b.id).unwrap_or(std::cmp::Ordering::Equal))
    });
    result
}

fn employees(store: &RowStore) -> Vec<Employee> {
    store
        .select_all(Table::Employees)
        .iter()
        .filter_map(|row| match Record::from_row(Table::Employees, row) {
            Some(Record::Employee(e)) => Some(e),
            _ => None,
        })
        .collect()
}

/// id (bit pattern) → name index for a reference table.
fn name_index(store: &RowStore, table: Table) -> HashMap<u64, String> {
    store
        .select_all(table)
        .iter()
        .filter_map(|row| {
            let id = row.0.first()?.as_identifier()?;
            let name = row.0.get(1)?.as_text()?;
            Some((id.to_bits(), name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Department, Job, Row};
    use chrono::{TimeZone, Utc};

    fn employee(id: f64, month: u32, year: i32, department_id: f64, job_id: f64) -> Row {
        Record::Employee(Employee {
            id,
            name: format!("emp{}", id),
            hired_at: Utc.with_ymd_and_hms(year, month, 15, 9, 0, 0).unwrap(),
            department_id,
            job_id,
        })
        .into_row()
    }

    fn seeded_store() -> RowStore {
        let store = RowStore::new();
        store
            .insert_batch(
                Table::Departments,
                vec![
                    Record::Department(Department {
                        id: 1.0,
                        name: "Engineering".to_string(),
                    })
                    .into_row(),
                    Record::Department(Department {
                        id: 2.0,
                        name: "Sales".to_string(),
                    })
                    .into_row(),
                ],
            )
            .unwrap();
        store
            .insert_batch(
                Table::Jobs,
                vec![Record::Job(Job {
                    id: 1.0,
                    name: "Analyst".to_string(),
                })
                .into_row()],
            )
            .unwrap();
        store
    }

    #[test]
    fn test_hires_by_quarter_counts_and_order() {
        let store = seeded_store();
        store
            .insert_batch(
                Table::Employees,
                vec![
                    employee(1.0, 1, 2021, 1.0, 1.0),  // Q1 Engineering
                    employee(2.0, 2, 2021, 1.0, 1.0),  // Q1 Engineering
                    employee(3.0, 7, 2021, 1.0, 1.0),  // Q3 Engineering
                    employee(4.0, 12, 2021, 2.0, 1.0), // Q4 Sales
                    employee(5.0, 5, 2020, 2.0, 1.0),  // other year, excluded
                ],
            )
            .unwrap();

        let report = hires_by_quarter(&store, 2021);
        assert_eq!(report.len(), 2);

        // Ordered by department name.
        assert_eq!(report[0].department.as_deref(), Some("Engineering"));
        assert_eq!(report[0].q1, 2);
        assert_eq!(report[0].q3, 1);
        assert_eq!(report[0].q4, 0);

        assert_eq!(report[1].department.as_deref(), Some("Sales"));
        assert_eq!(report[1].q4, 1);
    }

    #[test]
    fn test_hires_by_quarter_unknown_ids_keep_rows() {
        let store = seeded_store();
        store
            .insert_batch(
                Table::Employees,
                vec![employee(1.0, 3, 2021, 99.0, 77.0)],
            )
            .unwrap();

        let report = hires_by_quarter(&store, 2021);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].department, None);
        assert_eq!(report[0].job, None);
        assert_eq!(report[0].q1, 1);
    }

    #[test]
    fn test_hires_by_quarter_empty_when_no_hires_that_year() {
        let store = seeded_store();
        assert!(hires_by_quarter(&store, 2021).is_empty());
    }

    #[test]
    fn test_departments_above_mean() {
        let store = seeded_store();
        // Engineering: 3 hires in 2021. Sales: 1 hire in 2021.
        // Mean = 2; only Engineering exceeds it.
        store
            .insert_batch(
                Table::Employees,
                vec![
                    employee(1.0, 1, 2021, 1.0, 1.0),
                    employee(2.0, 2, 2021, 1.0, 1.0),
                    employee(3.0, 3, 2021, 1.0, 1.0),
                    employee(4.0, 4, 2021, 2.0, 1.0),
                ],
            )
            .unwrap();

        let report = departments_above_mean(&store, 2021);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].department.as_deref(), Some("Engineering"));
        assert_eq!(report[0].hired, 3);
        assert_eq!(report[0].id, 1.0);
    }

    #[test]
    fn test_departments_above_mean_counts_all_time_hires() {
        let store = seeded_store();
        // 2021: one hire each (mean 1). All-time: Sales has 3 via
        // earlier years, Engineering only the one.
        store
            .insert_batch(
                Table::Employees,
                vec![
                    employee(1.0, 1, 2021, 1.0, 1.0),
                    employee(2.0, 2, 2021, 2.0, 1.0),
                    employee(3.0, 3, 2019, 2.0, 1.0),
                    employee(4.0, 4, 2020, 2.0, 1.0),
                ],
            )
            .unwrap();

        let report = departments_above_mean(&store, 2021);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].department.as_deref(), Some("Sales"));
        assert_eq!(report[0].hired, 3);
    }

    #[test]
    fn test_departments_above_mean_empty_without_year_hires() {
        let store = seeded_store();
        store
            .insert_batch(Table::Employees, vec![employee(1.0, 1, 2019, 1.0, 1.0)])
            .unwrap();
        assert!(departments_above_mean(&store, 2021).is_empty());
    }

    #[test]
    fn test_mean_taken_over_year_but_totals_all_time() {
        let store = seeded_store();
        // 2021 hires: dep1 x1, so the mean is 1. All-time: dep1 has 1
        // (not above), dep2 has 2 (above).
        store
            .insert_batch(
                Table::Employees,
                vec![
                    employee(1.0, 1, 2021, 1.0, 1.0),
                    employee(2.0, 1, 2019, 2.0, 1.0),
                    employee(3.0, 2, 2019, 2.0, 1.0),
                ],
            )
            .unwrap();

        let report = departments_above_mean(&store, 2021);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].hired, 2);
    }
}
