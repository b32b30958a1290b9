use super::category::Category;
use super::task::{Task, DATE_FORMAT};
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) {
        Self::tasks_table(tasks).printstd();
    }

    pub fn categories(categories: &[Category]) {
        Self::categories_table(categories).printstd();
    }

    pub fn tasks_table(tasks: &[Task]) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "DESCRIPTION", "DUE", "STATUS", "CATEGORY", "CREATED"]);
        for task in tasks {
            let due = task
                .due_date
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string());
            let created = task
                .created_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            table.add_row(row![
                task.id,
                task.title,
                task.description,
                due,
                task.status,
                task.category_name(),
                created
            ]);
        }
        table
    }

    pub fn categories_table(categories: &[Category]) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME"]);
        for category in categories {
            table.add_row(row![category.id, category.name]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::task::TaskStatus;

    #[test]
    fn unresolved_category_renders_as_na() {
        let task = Task {
            id: "t1".to_string(),
            title: "Pay rent".to_string(),
            description: "Before the 5th".to_string(),
            due_date: None,
            status: TaskStatus::Pending,
            category: None,
            created_at: None,
        };
        let rendered = View::tasks_table(&[task]).to_string();
        assert!(rendered.contains("N/A"));
        assert!(rendered.contains("pending"));
    }
}
