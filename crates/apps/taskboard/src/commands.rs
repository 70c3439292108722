//! One-shot CLI commands, each driving a single controller.

use anyhow::{Result, anyhow};
use console::style;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use taskboard_client::ProfileUpdate;
use taskboard_core::{FilterCriteria, Task, TaskId, TaskPriority, TaskStats, TaskStatus};
use tracing::debug;

use taskboard::controllers::{
    AccountController, AppContext, CreateTaskController, DashboardController, LoginController,
    Outcome, RegisterController, Route, UpdateTaskController,
};

/// Field overrides collected from the command line.
#[derive(Debug, Default, Clone)]
pub struct TaskFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub deadline: Option<String>,
}

fn prompt_text(prompt: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?)
}

fn prompt_password(prompt: &str) -> Result<String> {
    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()?)
}

/// The command that opens the screen `route` points at.
pub fn route_hint(route: Route) -> String {
    match route {
        Route::Home => "taskboard --help".to_string(),
        Route::Login => "taskboard login".to_string(),
        Route::Register => "taskboard register".to_string(),
        Route::Dashboard => "taskboard dashboard".to_string(),
        Route::CreateTask => "taskboard create".to_string(),
        Route::EditTask(id) => format!("taskboard update {id}"),
    }
}

fn print_next(outcome: &Outcome) {
    if let Outcome::Navigate(route) = outcome {
        println!("Next: {}", style(route_hint(*route)).cyan());
    }
}

/// Turns a failed outcome into a command error.
fn check(outcome: Outcome) -> Result<Outcome> {
    match outcome {
        Outcome::Failed(message) => Err(anyhow!(message)),
        other => Ok(other),
    }
}

pub async fn register(
    ctx: AppContext,
    username: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let mut controller = RegisterController::new(ctx);
    controller.username = match username {
        Some(username) => username,
        None => prompt_text("Username")?,
    };
    controller.email = match email {
        Some(email) => email,
        None => prompt_text("Email")?,
    };
    controller.password = prompt_password("Password")?;

    let outcome = check(controller.submit().await)?;
    debug!(?outcome, "Register finished");

    println!(
        "{} {}",
        style("✓").green(),
        controller.success().unwrap_or("Registration successful!")
    );
    print_next(&outcome);
    Ok(())
}

pub async fn login(ctx: AppContext, username: Option<String>) -> Result<()> {
    let mut controller = LoginController::new(ctx);
    controller.username = match username {
        Some(username) => username,
        None => prompt_text("Username")?,
    };
    controller.password = prompt_password("Password")?;

    let outcome = check(controller.submit().await)?;

    println!(
        "{} Successfully logged in as: {}",
        style("✓").green(),
        style(controller.username.trim()).cyan().bold()
    );
    print_next(&outcome);
    Ok(())
}

pub fn logout(ctx: AppContext) -> Result<()> {
    let mut dashboard = DashboardController::new(ctx);
    check(dashboard.logout())?;
    println!("{} Successfully logged out", style("✓").green());
    Ok(())
}

pub async fn whoami(ctx: AppContext) -> Result<()> {
    let mut account = AccountController::new(ctx);
    check(account.load_profile().await)?;

    let user = account
        .profile()
        .ok_or_else(|| anyhow!("Profile unavailable"))?;
    println!("{} {}", style("Username:").bold(), user.username);
    if let Some(email) = &user.email {
        println!("{} {}", style("Email:").bold(), email);
    }
    if let Some(photo) = &user.photo {
        println!("{} {}", style("Photo:").bold(), photo);
    }
    Ok(())
}

pub async fn update_profile(
    ctx: AppContext,
    username: Option<String>,
    email: Option<String>,
    change_password: bool,
) -> Result<()> {
    let password = if change_password {
        Some(prompt_password("New password")?)
    } else {
        None
    };
    let update = ProfileUpdate {
        username,
        email,
        password,
    };

    let mut account = AccountController::new(ctx);
    check(account.update_profile(&update).await)?;

    println!("{} Profile updated", style("✓").green());
    if let Some(user) = account.profile() {
        println!("{} {}", style("Username:").bold(), user.username);
        if let Some(email) = &user.email {
            println!("{} {}", style("Email:").bold(), email);
        }
    }
    Ok(())
}

pub async fn refresh(ctx: AppContext) -> Result<()> {
    let mut account = AccountController::new(ctx);
    check(account.refresh().await)?;
    println!("{} Access token refreshed", style("✓").green());
    Ok(())
}

pub async fn list(ctx: AppContext, criteria: FilterCriteria, json: bool) -> Result<()> {
    let mut dashboard = DashboardController::new(ctx);
    check(dashboard.load().await)?;
    dashboard.set_criteria(criteria);

    let visible = dashboard.board().visible();
    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    print_stats(&dashboard.stats());
    println!();
    if visible.is_empty() {
        println!("{}", style("No tasks available.").dim());
    }
    for task in visible {
        print_task_line(task);
    }
    Ok(())
}

pub async fn show(ctx: AppContext, id: TaskId) -> Result<()> {
    let mut controller = UpdateTaskController::new(ctx, id);
    check(controller.load().await)?;

    let form = &controller.form;
    println!("{} {}", style(format!("#{}", id)).dim(), style(&form.title).bold());
    println!("{} {}", style("Description:").bold(), form.description);
    println!("{} {}", style("Status:").bold(), form.status.label());
    println!("{} {}", style("Priority:").bold(), form.priority.label());
    println!("{} {}", style("Deadline:").bold(), form.deadline);
    Ok(())
}

pub async fn create(ctx: AppContext, fields: TaskFields) -> Result<()> {
    let mut controller = CreateTaskController::new(ctx);
    let form = &mut controller.form;
    form.title = fields.title.unwrap_or_default();
    form.description = fields.description.unwrap_or_default();
    form.deadline = fields.deadline.unwrap_or_default();
    if let Some(priority) = fields.priority {
        form.priority = priority;
    }
    if let Some(status) = fields.status {
        form.status = status;
    }

    check(controller.submit().await)?;

    println!(
        "{} {}",
        style("✓").green(),
        controller.success().unwrap_or("Task created successfully!")
    );
    if let Some(task) = controller.created() {
        print_task_line(task);
    }
    Ok(())
}

pub async fn update(ctx: AppContext, id: TaskId, fields: TaskFields) -> Result<()> {
    let mut controller = UpdateTaskController::new(ctx, id);
    check(controller.load().await)?;

    let form = &mut controller.form;
    if let Some(title) = fields.title {
        form.title = title;
    }
    if let Some(description) = fields.description {
        form.description = description;
    }
    if let Some(priority) = fields.priority {
        form.priority = priority;
    }
    if let Some(status) = fields.status {
        form.status = status;
    }
    if let Some(deadline) = fields.deadline {
        form.deadline = deadline;
    }

    check(controller.submit().await)?;

    println!(
        "{} {}",
        style("✓").green(),
        controller.success().unwrap_or("Task updated successfully!")
    );
    if let Some(task) = controller.updated() {
        print_task_line(task);
    }
    Ok(())
}

pub async fn delete(ctx: AppContext, id: TaskId) -> Result<()> {
    let mut dashboard = DashboardController::new(ctx);
    check(dashboard.delete(id).await)?;
    println!("{} Deleted task #{}", style("✓").green(), id);
    Ok(())
}

fn print_stats(stats: &TaskStats) {
    println!(
        "{} {}   {} {}   {} {}   {} {}",
        style("Total:").bold(),
        stats.total,
        style("Completed:").bold(),
        style(stats.completed).green(),
        style("Pending:").bold(),
        style(stats.pending).yellow(),
        style("On hold:").bold(),
        stats.on_hold,
    );
    println!(
        "{} low {} / medium {} / high {}",
        style("Priority:").bold(),
        stats.priority.low,
        stats.priority.medium,
        stats.priority.high,
    );
}

fn print_task_line(task: &Task) {
    let priority = match task.priority {
        TaskPriority::High => style(task.priority.label()).red(),
        TaskPriority::Medium => style(task.priority.label()).yellow(),
        TaskPriority::Low => style(task.priority.label()).green(),
    };
    println!(
        "{} {}  [{}] [{}] due {}",
        style(format!("#{:<4}", task.id)).dim(),
        style(&task.title).bold(),
        task.status.label(),
        priority,
        task.deadline,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_hints() {
        assert_eq!(route_hint(Route::Login), "taskboard login");
        assert_eq!(route_hint(Route::Dashboard), "taskboard dashboard");
        assert_eq!(route_hint(Route::CreateTask), "taskboard create");
        assert_eq!(route_hint(Route::EditTask(12)), "taskboard update 12");
    }

    #[test]
    fn test_check_surfaces_failure_message() {
        let error = check(Outcome::Failed("Failed to fetch tasks.".to_string())).unwrap_err();
        assert_eq!(error.to_string(), "Failed to fetch tasks.");
        assert_eq!(check(Outcome::Stay).unwrap(), Outcome::Stay);
    }
}
