//! Reassembles denormalised join rows into nested project trees.

use std::collections::{HashMap, HashSet};

use crate::models::{user_ref, ProjectDetail, ProjectDetailRow, TaskDetail, UserSummary};

/// Project under construction plus the ids already placed in it
struct Pending {
    detail: ProjectDetail,
    member_ids: HashSet<i32>,
    task_ids: HashSet<i32>,
}

/// Fold joined rows into one [`ProjectDetail`] per distinct project.
///
/// Projects appear in the order their id is first seen. Members and tasks
/// keep their first-seen order within a project and are never repeated,
/// however many times the join duplicates them.
pub fn assemble_projects<I>(rows: I) -> Vec<ProjectDetail>
where
    I: IntoIterator<Item = ProjectDetailRow>,
{
    let mut index: HashMap<i32, usize> = HashMap::new();
    let mut pending: Vec<Pending> = Vec::new();

    for row in rows {
        let slot = *index.entry(row.project_id).or_insert_with(|| {
            pending.push(Pending {
                detail: ProjectDetail {
                    id: row.project_id,
                    name: row.project_name.clone(),
                    description: row.project_description.clone(),
                    users: Vec::new(),
                    tasks: Vec::new(),
                },
                member_ids: HashSet::new(),
                task_ids: HashSet::new(),
            });
            pending.len() - 1
        });
        let project = &mut pending[slot];

        if let Some(member_id) = row.member_id {
            if project.member_ids.insert(member_id) {
                project.detail.users.push(UserSummary {
                    id: member_id,
                    username: row.member_username.clone().unwrap_or_default(),
                });
            }
        }

        if let Some(task) = task_from_row(&row) {
            if project.task_ids.insert(task.id) {
                project.detail.tasks.push(task);
            }
        }
    }

    pending.into_iter().map(|p| p.detail).collect()
}

fn task_from_row(row: &ProjectDetailRow) -> Option<TaskDetail> {
    let id = row.task_id?;

    Some(TaskDetail {
        id,
        project_id: row.project_id,
        title: row.task_title.clone().unwrap_or_default(),
        description: row.task_description.clone().unwrap_or_default(),
        status: row.task_status.clone().unwrap_or_default(),
        assigned_user: user_ref(row.assigned_user_id, row.assigned_username.clone()),
        created_by: UserSummary {
            id: row.created_by_id.unwrap_or_default(),
            username: row.created_by_username.clone().unwrap_or_default(),
        },
        created_date: row.task_created_date.clone().unwrap_or_default(),
        modified_date: row.task_modified_date.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_row(id: i32) -> ProjectDetailRow {
        ProjectDetailRow {
            project_id: id,
            project_name: format!("P{}", id),
            project_description: Some(format!("project {}", id)),
            ..Default::default()
        }
    }

    fn with_member(mut row: ProjectDetailRow, id: i32, username: &str) -> ProjectDetailRow {
        row.member_id = Some(id);
        row.member_username = Some(username.to_string());
        row
    }

    fn with_task(mut row: ProjectDetailRow, id: i32, assignee: Option<i32>) -> ProjectDetailRow {
        row.task_id = Some(id);
        row.task_title = Some(format!("task {}", id));
        row.task_description = Some("desc".to_string());
        row.task_status = Some("To Do".to_string());
        row.task_created_date = Some("2025-04-28T18:44:50Z".to_string());
        row.task_modified_date = Some("2025-04-28T18:44:50Z".to_string());
        row.assigned_user_id = assignee;
        row.assigned_username = assignee.map(|id| format!("user{}", id));
        row.created_by_id = Some(1);
        row.created_by_username = Some("user1".to_string());
        row
    }

    #[test]
    fn empty_input_yields_no_projects() {
        assert!(assemble_projects(Vec::new()).is_empty());
    }

    #[test]
    fn project_without_members_or_tasks_has_empty_lists() {
        let projects = assemble_projects(vec![project_row(1)]);

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "P1");
        assert!(projects[0].users.is_empty());
        assert!(projects[0].tasks.is_empty());
    }

    #[test]
    fn projects_keep_first_seen_order() {
        let rows = vec![
            with_member(project_row(2), 1, "user1"),
            project_row(1),
            with_member(project_row(2), 2, "user2"),
        ];

        let projects = assemble_projects(rows);
        let ids: Vec<i32> = projects.iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![2, 1]);
        let members: Vec<i32> = projects[0].users.iter().map(|u| u.id).collect();
        assert_eq!(members, vec![1, 2]);
    }

    #[test]
    fn cross_product_rows_are_deduplicated() {
        // 2 members x 2 tasks, as a join would produce
        let mut rows = Vec::new();
        for member in [10, 11] {
            for task in [100, 101] {
                rows.push(with_task(
                    with_member(project_row(1), member, &format!("user{}", member)),
                    task,
                    Some(member),
                ));
            }
        }

        let projects = assemble_projects(rows);

        assert_eq!(projects.len(), 1);
        let members: Vec<i32> = projects[0].users.iter().map(|u| u.id).collect();
        let tasks: Vec<i32> = projects[0].tasks.iter().map(|t| t.id).collect();
        assert_eq!(members, vec![10, 11]);
        assert_eq!(tasks, vec![100, 101]);
        // First-seen row wins for the task body
        assert_eq!(projects[0].tasks[0].assigned_user.as_ref().unwrap().id, 10);
    }

    #[test]
    fn repeated_rows_match_single_copy() {
        let base = vec![
            with_task(with_member(project_row(3), 5, "user5"), 50, None),
            with_task(project_row(4), 60, Some(5)),
        ];
        let repeated: Vec<ProjectDetailRow> = (0..4).flat_map(|_| base.clone()).collect();

        assert_eq!(assemble_projects(repeated), assemble_projects(base));
    }

    #[test]
    fn task_fields_are_expanded() {
        let projects = assemble_projects(vec![with_task(project_row(1), 7, None)]);
        let task = &projects[0].tasks[0];

        assert_eq!(task.id, 7);
        assert_eq!(task.project_id, 1);
        assert_eq!(task.title, "task 7");
        assert!(task.assigned_user.is_none());
        assert_eq!(
            task.created_by,
            UserSummary {
                id: 1,
                username: "user1".to_string()
            }
        );
    }
}
