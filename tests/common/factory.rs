use uuid::Uuid;

use taskflow::models::{now_timestamp, CreateProject, CreateTask, CreateUser, Project, Task, User};
use taskflow::repositories::{MembershipRepository, ProjectRepository, TaskRepository, UserRepository};
use taskflow::services::AuthService;
use taskflow::state::AppState;

/// Authentication info for tests
pub struct TestAuth {
    pub user_id: i32,
    pub username: String,
    pub token: String,
}

impl TestAuth {
    /// Get the Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test user and return auth info
    pub async fn create_user(&self) -> TestAuth {
        let username = format!("user-{}", Uuid::new_v4());
        let user = self.create_user_with_credentials(&username, "TestPassword123!").await;

        let token =
            AuthService::generate_token(user.id, &user.username, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            username,
            token,
        }
    }

    /// Create a test user with specific credentials
    pub async fn create_user_with_credentials(&self, username: &str, password: &str) -> User {
        let input = CreateUser {
            username: username.to_string(),
            password: password.to_string(),
        };

        let password_hash = AuthService::hash_password(password).unwrap();
        UserRepository::create(&self.state.db, &input, &password_hash)
            .await
            .unwrap()
    }

    /// Create a test project
    pub async fn create_project(&self) -> Project {
        self.create_project_with_name(&format!("Test Project {}", Uuid::new_v4()))
            .await
    }

    /// Create a test project with specific name
    pub async fn create_project_with_name(&self, name: &str) -> Project {
        let input = CreateProject {
            name: name.to_string(),
            description: Some("Test project description".to_string()),
        };

        ProjectRepository::create(&self.state.db, &input)
            .await
            .unwrap()
    }

    /// Add a user to a project
    pub async fn add_member(&self, project_id: i32, user_id: i32) {
        MembershipRepository::add(&self.state.db, project_id, user_id)
            .await
            .unwrap();
    }

    /// Create a test task
    pub async fn create_task(&self, project_id: i32, created_by: i32) -> Task {
        self.create_task_assigned(project_id, created_by, None).await
    }

    /// Create a test task with an assignee
    pub async fn create_task_assigned(
        &self,
        project_id: i32,
        created_by: i32,
        assigned_user_id: Option<i32>,
    ) -> Task {
        let now = now_timestamp().unwrap();
        let input = CreateTask {
            project_id,
            title: format!("Test Task {}", Uuid::new_v4()),
            description: "Test task description".to_string(),
            status: "To Do".to_string(),
            assigned_user_id,
            created_by,
            created_date: now.clone(),
            modified_date: now,
        };

        TaskRepository::create(&self.state.db, &input).await.unwrap()
    }
}
