//! Diesel schema for board persistence.

diesel::table! {
    /// Time-boxed cycles of a project.
    cycles (id) {
        /// Cycle identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// First day of the cycle.
        starts_on -> Date,
        /// Last day of the cycle.
        ends_on -> Date,
        /// Materialized lifecycle status.
        #[max_length = 16]
        status -> Varchar,
    }
}

diesel::table! {
    /// Ordered lanes within a cycle.
    board_columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Owning cycle.
        cycle_id -> Uuid,
        /// Owning project, mirrored from the cycle.
        project_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Rank within the cycle.
        sequence -> Int4,
    }
}

diesel::table! {
    /// Tasks ranked within a column.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning project, mirrored from the column.
        project_id -> Uuid,
        /// Owning cycle, mirrored from the column.
        cycle_id -> Uuid,
        /// Owning column.
        column_id -> Uuid,
        /// Task name.
        #[max_length = 255]
        name -> Varchar,
        /// Free-text info.
        info -> Text,
        /// Assigned user.
        assignee_id -> Uuid,
        /// Cycle status snapshot taken at creation.
        #[max_length = 16]
        status -> Varchar,
        /// Rank within the column.
        sequence -> Int4,
    }
}

diesel::joinable!(board_columns -> cycles (cycle_id));
diesel::joinable!(tasks -> board_columns (column_id));

diesel::allow_tables_to_appear_in_same_query!(cycles, board_columns, tasks);
