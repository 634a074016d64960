use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::models::Course;
use crate::schedule::{ScheduleError, SessionType, month_name};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("Available spaces overflow for course {0:?}")]
    SpacesOverflow(String),
}

/// Optional filters of a course listing. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFilter {
    pub month: Option<String>,
    pub venue: Option<String>,
    pub session_type: Option<String>,
}

impl CourseFilter {
    /// Decides whether a course is kept.
    ///
    /// The start date is parsed even when no month filter is set, so a record
    /// with a malformed date always fails the listing. An unrecognised
    /// session type matches nothing.
    pub fn matches(&self, course: &Course) -> Result<bool, ScheduleError> {
        let course_month = month_name(&course.formatted_start_date)?;

        let matches_month = self
            .month
            .as_deref()
            .is_none_or(|month| course_month == month);
        let matches_venue = self
            .venue
            .as_deref()
            .is_none_or(|venue| course.venue.name == venue);
        let matches_type = match self.session_type.as_deref() {
            None => true,
            Some(label) => match SessionType::from_label(label) {
                Some(kind) => kind.matches(&course.days)?,
                None => false,
            },
        };

        Ok(matches_month && matches_venue && matches_type)
    }
}

pub fn filter_courses(
    courses: Vec<Course>,
    filter: &CourseFilter,
) -> Result<Vec<Course>, ScheduleError> {
    let mut kept = Vec::with_capacity(courses.len());
    for course in courses {
        if filter.matches(&course)? {
            kept.push(course);
        }
    }
    Ok(kept)
}

/// Merges courses sharing venue and start/end dates, summing their
/// `available_spaces` into the first one seen. Output keeps first-seen order.
pub fn aggregate_courses(courses: Vec<Course>) -> Result<Vec<Course>, QueryError> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut aggregated: Vec<Course> = Vec::new();

    for course in courses {
        let key = course.aggregation_key();
        match index.get(&key).copied() {
            Some(position) => {
                let base = &mut aggregated[position];
                base.available_spaces = base
                    .available_spaces
                    .checked_add(course.available_spaces)
                    .ok_or(QueryError::SpacesOverflow(key))?;
            }
            None => {
                index.insert(key, aggregated.len());
                aggregated.push(course);
            }
        }
    }
    Ok(aggregated)
}

/// Filters then aggregates.
pub fn list_courses(
    courses: Vec<Course>,
    filter: &CourseFilter,
) -> Result<Vec<Course>, QueryError> {
    let total = courses.len();
    let filtered = filter_courses(courses, filter)?;
    let matched = filtered.len();
    let aggregated = aggregate_courses(filtered)?;
    debug!(
        total,
        matched,
        aggregated = aggregated.len(),
        "course listing computed"
    );
    Ok(aggregated)
}

/// Groups courses by start date, end date and venue, returning only groups
/// with more than one member. Records are left unmerged.
pub fn similar_courses(courses: Vec<Course>) -> Vec<Vec<Course>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<Course>> = Vec::new();

    for course in courses {
        let key = course.similarity_key();
        let position = *index.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[position].push(course);
    }

    groups.retain(|group| group.len() > 1);
    groups
}
