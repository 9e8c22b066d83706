//! PostgreSQL-backed goal repository.

use crate::domain::Goal;

use super::macros::define_owner_scoped_repository;
use super::models::{GoalChanges, GoalRow};
use super::schema::goals;

define_owner_scoped_repository! {
    /// Diesel implementation of the goal port.
    pub struct DieselGoalRepository for Goal {
        table: goals,
        row: GoalRow,
        changes: GoalChanges,
        noun: "goal",
    }
}
