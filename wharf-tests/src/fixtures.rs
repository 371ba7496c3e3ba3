use rust_decimal::Decimal;
use wharf_core::{
    AsValue, Cardinality, Entity, EntityMetadata, Result, RowLabeled, StaticMetadata, Value,
};

/// Companies, departments, employees with a self referencing manager, badges and projects.
///
/// The employee join map (default depth 4) has 15 entries, from `department` (`_department_1`)
/// to `manager.manager.manager.manager` (`_manager_15`).
pub fn schema() -> StaticMetadata {
    StaticMetadata::new()
        .with(
            EntityMetadata::new("Company", "companies")
                .id("id", "company_id", Value::Int64(None))
                .field("name", "company_name", Value::Varchar(None))
                .association("departments", Cardinality::OneToMany, "Department"),
        )
        .with(
            EntityMetadata::new("Department", "departments")
                .id("id", "department_id", Value::Int64(None))
                .field("name", "department_name", Value::Varchar(None))
                .association("company", Cardinality::ManyToOne, "Company")
                .association("employees", Cardinality::OneToMany, "Employee"),
        )
        .with(
            EntityMetadata::new("Employee", "employees")
                .id("id", "employee_id", Value::Int64(None))
                .field("name", "full_name", Value::Varchar(None))
                .field("status", "status", Value::Varchar(None))
                .field("salary", "salary", Value::Decimal(None))
                .association("department", Cardinality::ManyToOne, "Department")
                .association("badge", Cardinality::OneToOne, "Badge")
                .association("manager", Cardinality::ManyToOne, "Employee")
                .association("projects", Cardinality::ManyToMany, "Project"),
        )
        .with(
            EntityMetadata::new("Badge", "badges")
                .id("id", "badge_id", Value::Int64(None))
                .field("code", "code", Value::Varchar(None)),
        )
        .with(
            EntityMetadata::new("Project", "projects")
                .id("code", "project_code", Value::Varchar(None))
                .id("year", "project_year", Value::Int32(None))
                .field("title", "title", Value::Varchar(None))
                .association("members", Cardinality::ManyToMany, "Employee"),
        )
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub salary: Decimal,
}

impl Employee {
    pub fn new(id: i64, name: &str, status: &str, salary: i64) -> Self {
        Self {
            id,
            name: name.into(),
            status: status.into(),
            salary: Decimal::from(salary),
        }
    }
}

impl Entity for Employee {
    fn entity_type() -> &'static str {
        "Employee"
    }
    fn from_row(row: RowLabeled) -> Result<Self> {
        Ok(Self {
            id: row.get_as("id")?,
            name: row.get_as("name")?,
            status: row.get_as("status")?,
            salary: row.get_as("salary")?,
        })
    }
    fn row(&self) -> RowLabeled {
        [
            ("id", self.id.as_value()),
            ("name", self.name.clone().as_value()),
            ("status", self.status.clone().as_value()),
            ("salary", self.salary.as_value()),
        ]
        .into_iter()
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

impl Entity for Department {
    fn entity_type() -> &'static str {
        "Department"
    }
    fn from_row(row: RowLabeled) -> Result<Self> {
        Ok(Self {
            id: row.get_as("id")?,
            name: row.get_as("name")?,
        })
    }
    fn row(&self) -> RowLabeled {
        [
            ("id", self.id.as_value()),
            ("name", self.name.clone().as_value()),
        ]
        .into_iter()
        .collect()
    }
}

/// Identified by `code` and `year` together.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub code: String,
    pub year: i32,
    pub title: String,
}

impl Entity for Project {
    fn entity_type() -> &'static str {
        "Project"
    }
    fn from_row(row: RowLabeled) -> Result<Self> {
        Ok(Self {
            code: row.get_as("code")?,
            year: row.get_as("year")?,
            title: row.get_as("title")?,
        })
    }
    fn row(&self) -> RowLabeled {
        [
            ("code", self.code.clone().as_value()),
            ("year", self.year.as_value()),
            ("title", self.title.clone().as_value()),
        ]
        .into_iter()
        .collect()
    }
}
