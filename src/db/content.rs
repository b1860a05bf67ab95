use crate::db::{DbResultExt, PortfolioDb};
use crate::types::{About, Contact, Home, Project, Result};

impl PortfolioDb {
    // ============== Home ==============

    pub async fn list_home(&self) -> Result<Vec<Home>> {
        let conn = self.connection().await?;

        let mut rows = conn
            .query("SELECT id, title, description FROM home ORDER BY id", ())
            .await
            .db_context("Failed to query home")?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await.db_context("Failed to read home row")? {
            items.push(Home {
                id: row.get(0).db_context("Failed to read home row")?,
                title: row.get(1).db_context("Failed to read home row")?,
                description: row.get(2).db_context("Failed to read home row")?,
            });
        }

        Ok(items)
    }

    pub async fn create_home(&self, home: &Home) -> Result<i64> {
        let conn = self.connection().await?;

        conn.execute(
            "INSERT INTO home (title, description) VALUES (?1, ?2)",
            (home.title.as_str(), home.description.as_str()),
        )
        .await
        .db_context("Failed to create home")?;

        Ok(conn.last_insert_rowid())
    }

    /// Returns `false` when `home.id` matches no row.
    pub async fn update_home(&self, home: &Home) -> Result<bool> {
        let conn = self.connection().await?;

        let affected = conn
            .execute(
                "UPDATE home SET title = ?1, description = ?2 WHERE id = ?3",
                (home.title.as_str(), home.description.as_str(), home.id),
            )
            .await
            .db_context("Failed to update home")?;

        Ok(affected > 0)
    }

    pub async fn delete_home(&self, id: i64) -> Result<bool> {
        let conn = self.connection().await?;

        let affected = conn
            .execute("DELETE FROM home WHERE id = ?1", [id])
            .await
            .db_context("Failed to delete home")?;

        Ok(affected > 0)
    }

    // ============== About ==============

    pub async fn list_about(&self) -> Result<Vec<About>> {
        let conn = self.connection().await?;

        let mut rows = conn
            .query("SELECT id, content FROM about ORDER BY id", ())
            .await
            .db_context("Failed to query about")?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await.db_context("Failed to read about row")? {
            items.push(About {
                id: row.get(0).db_context("Failed to read about row")?,
                content: row.get(1).db_context("Failed to read about row")?,
            });
        }

        Ok(items)
    }

    pub async fn create_about(&self, about: &About) -> Result<i64> {
        let conn = self.connection().await?;

        conn.execute(
            "INSERT INTO about (content) VALUES (?1)",
            [about.content.as_str()],
        )
        .await
        .db_context("Failed to create about")?;

        Ok(conn.last_insert_rowid())
    }

    pub async fn update_about(&self, about: &About) -> Result<bool> {
        let conn = self.connection().await?;

        let affected = conn
            .execute(
                "UPDATE about SET content = ?1 WHERE id = ?2",
                (about.content.as_str(), about.id),
            )
            .await
            .db_context("Failed to update about")?;

        Ok(affected > 0)
    }

    pub async fn delete_about(&self, id: i64) -> Result<bool> {
        let conn = self.connection().await?;

        let affected = conn
            .execute("DELETE FROM about WHERE id = ?1", [id])
            .await
            .db_context("Failed to delete about")?;

        Ok(affected > 0)
    }

    // ============== Projects ==============

    /// Newest first.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let conn = self.connection().await?;

        let mut rows = conn
            .query(
                "SELECT id, name, description, message,
                    COALESCE(image_url, ''), COALESCE(technologies, ''),
                    COALESCE(github_url, ''), COALESCE(demo_url, '')
                 FROM projects ORDER BY id DESC",
                (),
            )
            .await
            .db_context("Failed to query projects")?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await.db_context("Failed to read project row")? {
            items.push(Project {
                id: row.get(0).db_context("Failed to read project row")?,
                name: row.get(1).db_context("Failed to read project row")?,
                description: row.get(2).db_context("Failed to read project row")?,
                message: row.get(3).db_context("Failed to read project row")?,
                image_url: row.get(4).db_context("Failed to read project row")?,
                technologies: row.get(5).db_context("Failed to read project row")?,
                github_url: row.get(6).db_context("Failed to read project row")?,
                demo_url: row.get(7).db_context("Failed to read project row")?,
            });
        }

        Ok(items)
    }

    pub async fn create_project(&self, project: &Project) -> Result<i64> {
        let conn = self.connection().await?;

        conn.execute(
            "INSERT INTO projects
                (name, description, message, image_url, technologies, github_url, demo_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                project.name.as_str(),
                project.description.as_str(),
                project.message.as_str(),
                project.image_url.as_str(),
                project.technologies.as_str(),
                project.github_url.as_str(),
                project.demo_url.as_str(),
            ),
        )
        .await
        .db_context("Failed to create project")?;

        Ok(conn.last_insert_rowid())
    }

    /// Overwrites every column of project `id`; `project.id` is ignored.
    pub async fn update_project(&self, id: i64, project: &Project) -> Result<bool> {
        let conn = self.connection().await?;

        let affected = conn
            .execute(
                "UPDATE projects SET name = ?1, description = ?2, message = ?3, image_url = ?4,
                    technologies = ?5, github_url = ?6, demo_url = ?7
                 WHERE id = ?8",
                (
                    project.name.as_str(),
                    project.description.as_str(),
                    project.message.as_str(),
                    project.image_url.as_str(),
                    project.technologies.as_str(),
                    project.github_url.as_str(),
                    project.demo_url.as_str(),
                    id,
                ),
            )
            .await
            .db_context("Failed to update project")?;

        Ok(affected > 0)
    }

    pub async fn delete_project(&self, id: i64) -> Result<bool> {
        let conn = self.connection().await?;

        let affected = conn
            .execute("DELETE FROM projects WHERE id = ?1", [id])
            .await
            .db_context("Failed to delete project")?;

        Ok(affected > 0)
    }

    // ============== Contact ==============

    pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let conn = self.connection().await?;

        let mut rows = conn
            .query(
                "SELECT id, name, email, phone, message FROM contact ORDER BY id",
                (),
            )
            .await
            .db_context("Failed to query contacts")?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await.db_context("Failed to read contact row")? {
            items.push(Contact {
                id: row.get(0).db_context("Failed to read contact row")?,
                name: row.get(1).db_context("Failed to read contact row")?,
                email: row.get(2).db_context("Failed to read contact row")?,
                phone: row.get(3).db_context("Failed to read contact row")?,
                message: row.get(4).db_context("Failed to read contact row")?,
            });
        }

        Ok(items)
    }

    pub async fn create_contact(&self, contact: &Contact) -> Result<i64> {
        let conn = self.connection().await?;

        conn.execute(
            "INSERT INTO contact (name, email, phone, message) VALUES (?1, ?2, ?3, ?4)",
            (
                contact.name.as_str(),
                contact.email.as_str(),
                contact.phone.as_str(),
                contact.message.as_str(),
            ),
        )
        .await
        .db_context("Failed to create contact")?;

        Ok(conn.last_insert_rowid())
    }

    pub async fn update_contact(&self, contact: &Contact) -> Result<bool> {
        let conn = self.connection().await?;

        let affected = conn
            .execute(
                "UPDATE contact SET name = ?1, email = ?2, phone = ?3, message = ?4 WHERE id = ?5",
                (
                    contact.name.as_str(),
                    contact.email.as_str(),
                    contact.phone.as_str(),
                    contact.message.as_str(),
                    contact.id,
                ),
            )
            .await
            .db_context("Failed to update contact")?;

        Ok(affected > 0)
    }

    pub async fn delete_contact(&self, id: i64) -> Result<bool> {
        let conn = self.connection().await?;

        let affected = conn
            .execute("DELETE FROM contact WHERE id = ?1", [id])
            .await
            .db_context("Failed to delete contact")?;

        Ok(affected > 0)
    }
}
