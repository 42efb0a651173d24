use crate::error::Result;
use crate::models::EmployeeOfMonth;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create(
    pool: &PgPool,
    employee_id: Uuid,
    name: &str,
    department: &str,
    month_year: &str,
) -> Result<EmployeeOfMonth> {
    let row = sqlx::query_as::<_, EmployeeOfMonth>(
        r#"
        INSERT INTO employee_of_month (employee_id, name, department, month_year)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(employee_id)
    .bind(name)
    .bind(department)
    .bind(month_year)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Latest announcement, optionally confined to one department
pub async fn latest(pool: &PgPool, department: Option<&str>) -> Result<Option<EmployeeOfMonth>> {
    let row = match department {
        Some(dept) => {
            sqlx::query_as::<_, EmployeeOfMonth>(
                r#"
                SELECT * FROM employee_of_month
                WHERE department = $1
                ORDER BY created_at DESC
                LIMIT 1
                "#,
            )
            .bind(dept)
            .fetch_optional(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, EmployeeOfMonth>(
                "SELECT * FROM employee_of_month ORDER BY created_at DESC LIMIT 1",
            )
            .fetch_optional(pool)
            .await?
        }
    };

    Ok(row)
}

/// Full announcement history, newest first
pub async fn list_all(pool: &PgPool) -> Result<Vec<EmployeeOfMonth>> {
    let rows = sqlx::query_as::<_, EmployeeOfMonth>(
        "SELECT * FROM employee_of_month ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
