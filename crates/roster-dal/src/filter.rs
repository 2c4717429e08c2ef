//! Optional player filters rendered into a parameterised `WHERE` clause.
//!
//! Each factory returns `None` when its input is absent, which matches every
//! row. Present conditions are joined with `AND`.

use sqlx::QueryBuilder;

use crate::{
    ChosenDB,
    player::{Profession, Race},
};

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Case sensitive substring match
    Contains {
        column: &'static str,
        value: String,
    },
    Equals {
        column: &'static str,
        value: FilterValue,
    },
    /// Inclusive range, at least one bound is set
    Range {
        column: &'static str,
        min: Option<i64>,
        max: Option<i64>,
    },
}

impl Condition {
    fn range(column: &'static str, min: Option<i64>, max: Option<i64>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            None
        } else {
            Some(Condition::Range { column, min, max })
        }
    }

    pub fn push_sql(self, query: &mut QueryBuilder<'_, ChosenDB>) {
        match self {
            Condition::Contains { column, value } => {
                // instr is case sensitive and has no wildcards, unlike LIKE in sqlite
                query
                    .push(format!("instr({column}, "))
                    .push_bind(value)
                    .push(") > 0");
            }
            Condition::Equals { column, value } => {
                query.push(format!("{column} = "));
                match value {
                    FilterValue::Text(v) => query.push_bind(v),
                    FilterValue::Bool(v) => query.push_bind(v),
                };
            }
            Condition::Range { column, min, max } => match (min, max) {
                (Some(min), Some(max)) => {
                    query
                        .push(format!("{column} BETWEEN "))
                        .push_bind(min)
                        .push(" AND ")
                        .push_bind(max);
                }
                (Some(min), None) => {
                    query.push(format!("{column} >= ")).push_bind(min);
                }
                (None, Some(max)) => {
                    query.push(format!("{column} <= ")).push_bind(max);
                }
                (None, None) => {
                    query.push("1 = 1");
                }
            },
        }
    }
}

pub fn name_contains(name: Option<&str>) -> Option<Condition> {
    name.map(|n| Condition::Contains {
        column: "name",
        value: n.to_string(),
    })
}

pub fn title_contains(title: Option<&str>) -> Option<Condition> {
    title.map(|t| Condition::Contains {
        column: "title",
        value: t.to_string(),
    })
}

pub fn race_is(race: Option<Race>) -> Option<Condition> {
    race.map(|r| Condition::Equals {
        column: "race",
        value: FilterValue::Text(r.as_str().to_string()),
    })
}

pub fn profession_is(profession: Option<Profession>) -> Option<Condition> {
    profession.map(|p| Condition::Equals {
        column: "profession",
        value: FilterValue::Text(p.as_str().to_string()),
    })
}

/// Bounds are epoch milliseconds
pub fn born_between(after: Option<i64>, before: Option<i64>) -> Option<Condition> {
    Condition::range("birthday", after, before)
}

pub fn banned_is(banned: Option<bool>) -> Option<Condition> {
    banned.map(|b| Condition::Equals {
        column: "banned",
        value: FilterValue::Bool(b),
    })
}

pub fn experience_between(min: Option<i32>, max: Option<i32>) -> Option<Condition> {
    Condition::range("experience", min.map(i64::from), max.map(i64::from))
}

pub fn level_between(min: Option<i32>, max: Option<i32>) -> Option<Condition> {
    Condition::range("level", min.map(i64::from), max.map(i64::from))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerFilter {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub after: Option<i64>,
    pub before: Option<i64>,
    pub banned: Option<bool>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub min_level: Option<i32>,
    pub max_level: Option<i32>,
}

impl PlayerFilter {
    pub fn conditions(&self) -> Vec<Condition> {
        [
            name_contains(self.name.as_deref()),
            title_contains(self.title.as_deref()),
            race_is(self.race),
            profession_is(self.profession),
            born_between(self.after, self.before),
            banned_is(self.banned),
            experience_between(self.min_experience, self.max_experience),
            level_between(self.min_level, self.max_level),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Appends ` WHERE ...` to the query, or nothing if no filter is set
    pub fn push_where(&self, query: &mut QueryBuilder<'_, ChosenDB>) {
        for (i, condition) in self.conditions().into_iter().enumerate() {
            query.push(if i == 0 { " WHERE " } else { " AND " });
            condition.push_sql(query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(filter: &PlayerFilter) -> String {
        let mut query = QueryBuilder::<ChosenDB>::new("SELECT * FROM player");
        filter.push_where(&mut query);
        query.sql().to_string()
    }

    #[test]
    fn test_absent_inputs_are_noop() {
        assert!(name_contains(None).is_none());
        assert!(race_is(None).is_none());
        assert!(born_between(None, None).is_none());
        assert!(banned_is(None).is_none());
        assert!(level_between(None, None).is_none());
        assert!(PlayerFilter::default().conditions().is_empty());
        assert_eq!("SELECT * FROM player", render(&PlayerFilter::default()));
    }

    #[test]
    fn test_exact_match_values() {
        assert_eq!(
            Some(Condition::Equals {
                column: "race",
                value: FilterValue::Text("ELF".to_string())
            }),
            race_is(Some(Race::Elf))
        );
        assert_eq!(
            Some(Condition::Equals {
                column: "banned",
                value: FilterValue::Bool(true)
            }),
            banned_is(Some(true))
        );
    }

    #[test]
    fn test_half_open_ranges() {
        assert_eq!(
            Some(Condition::Range {
                column: "experience",
                min: Some(100),
                max: None
            }),
            experience_between(Some(100), None)
        );

        let filter = PlayerFilter {
            max_level: Some(5),
            ..Default::default()
        };
        assert_eq!("SELECT * FROM player WHERE level <= ?", render(&filter));

        let filter = PlayerFilter {
            after: Some(0),
            ..Default::default()
        };
        assert_eq!("SELECT * FROM player WHERE birthday >= ?", render(&filter));
    }

    #[test]
    fn test_all_conditions_joined() {
        let filter = PlayerFilter {
            name: Some("ar".to_string()),
            title: Some("King".to_string()),
            race: Some(Race::Elf),
            profession: Some(Profession::Druid),
            after: Some(946_674_000_482),
            before: Some(1_200_000_000_000),
            banned: Some(false),
            min_experience: Some(100),
            max_experience: Some(200),
            min_level: Some(1),
            max_level: Some(3),
        };
        assert_eq!(8, filter.conditions().len());
        assert_eq!(
            "SELECT * FROM player WHERE instr(name, ?) > 0 AND instr(title, ?) > 0 \
            AND race = ? AND profession = ? AND birthday BETWEEN ? AND ? AND banned = ? \
            AND experience BETWEEN ? AND ? AND level BETWEEN ? AND ?",
            render(&filter)
        );
    }
}
