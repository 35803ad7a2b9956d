//! Score operations

use tracing::info;
use crate::error::Result;
use crate::database::{queries, Score, ScoreFilter};
use super::classroom::Classroom;

impl Classroom {
    /// Store a score as given
    pub fn insert_score(&self, score: &Score) -> Result<()> {
        queries::insert_score(self.score_conn()?, score)?;
        info!("[Classroom] Added score {} for exam {}", score.id, score.exam_id);
        Ok(())
    }

    /// Update a score
    pub fn edit_score(&self, score: &Score) -> Result<()> {
        queries::update_score(self.score_conn()?, score)?;
        info!("[Classroom] Updated score {}", score.id);
        Ok(())
    }

    /// Delete a score
    pub fn delete_score(&self, score_id: &str) -> Result<()> {
        queries::delete_score(self.score_conn()?, score_id)?;
        info!("[Classroom] Deleted score {}", score_id);
        Ok(())
    }

    /// Score of a user in an exam
    pub fn get_score(&self, exam_id: &str, user_id: &str) -> Result<Option<Score>> {
        queries::get_score(self.score_conn()?, exam_id, user_id)
    }

    /// List scores matching `filter`
    pub fn list_scores(&self, filter: &ScoreFilter, limit: usize) -> Result<Vec<Score>> {
        queries::query_scores(self.score_conn()?, filter, limit)
    }
}
