//! Session: the root context tying the container tree together.
//!
//! A session owns the project container and the preferences value. It adds
//! the two cross-level views the tree itself cannot provide: the selected
//! path (one key per level, following select keys downward) and execute
//! path expansion (the cartesian product of each level's execute targets,
//! with data series taking priority over flat records).

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::container::ObjectContainer;
use crate::entity::NmEntity;
use crate::errors::{CoreError, CoreResult};
use crate::folder::Folder;
use crate::preferences::Preferences;
use crate::project::{Project, PROJECT_PREFIX};

/// One fully-qualified execution target.
///
/// Exactly one of the two tails is populated: `dataseries`/`channel`/`epoch`
/// when the folder's series level is active, `data` when the folder falls
/// back to its flat records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutePath {
    pub project: String,
    pub folder: String,
    pub dataseries: Option<String>,
    pub channel: Option<String>,
    pub epoch: Option<String>,
    pub data: Option<String>,
}

impl std::fmt::Display for ExecutePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.project, self.folder)?;
        if let Some(data) = &self.data {
            return write!(f, "/{data}");
        }
        for part in [&self.dataseries, &self.channel, &self.epoch]
            .into_iter()
            .flatten()
        {
            write!(f, "/{part}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    projects: ObjectContainer<Project>,
    preferences: Preferences,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_preferences(Preferences::default())
    }

    pub fn with_preferences(preferences: Preferences) -> Self {
        Self {
            projects: ObjectContainer::with_sequence(PROJECT_PREFIX, preferences.name_seq),
            preferences,
        }
    }

    pub fn projects(&self) -> &ObjectContainer<Project> {
        &self.projects
    }

    pub fn projects_mut(&mut self) -> &mut ObjectContainer<Project> {
        &mut self.projects
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    /// The currently selected path: `(level, key)` pairs from the project
    /// level downward, stopping at the first level with no selection. The
    /// data level is not part of the path; records are reached through the
    /// execute axis.
    pub fn selected_path(&self) -> Vec<(&'static str, String)> {
        let mut path = Vec::new();
        let Some(project) = self.projects.selected() else {
            return path;
        };
        path.push(("project", project.name().to_string()));
        let Some(folder) = project.folders().selected() else {
            return path;
        };
        path.push(("folder", folder.name().to_string()));
        let Some(series) = folder.dataseries().selected() else {
            return path;
        };
        path.push(("dataseries", series.name().to_string()));
        let Some(channel) = series.channels().selected() else {
            return path;
        };
        path.push(("channel", channel.name().to_string()));
        if let Some(epoch) = series.epochs().selected() {
            path.push(("epoch", epoch.name().to_string()));
        }
        path
    }

    /// Set select keys at several levels in one call. Pairs are applied in
    /// the order given, so parent levels must precede the children they
    /// anchor (selecting a folder requires a selected project, and so on).
    /// Level names: `project`, `folder`, `data`, `dataseries`, `channel`,
    /// `epoch`.
    pub fn select_path(&mut self, levels: &[(&str, &str)]) -> CoreResult<()> {
        debug!(
            "select_path: {}",
            levels.iter().map(|(l, k)| format!("{l}={k}")).join(", ")
        );
        for (level, key) in levels {
            match *level {
                "project" => self.projects.select(key)?,
                "folder" => self.selected_project_mut()?.folders_mut().select(key)?,
                "data" => self.selected_folder_mut()?.data_mut().select(key)?,
                "dataseries" => self.selected_folder_mut()?.dataseries_mut().select(key)?,
                "channel" => {
                    let folder = self.selected_folder_mut()?;
                    let series =
                        folder
                            .dataseries_mut()
                            .selected_mut()
                            .ok_or(CoreError::NoSelection {
                                level: "dataseries".to_string(),
                            })?;
                    series.channels_mut().select(key)?;
                }
                "epoch" => {
                    let folder = self.selected_folder_mut()?;
                    let series =
                        folder
                            .dataseries_mut()
                            .selected_mut()
                            .ok_or(CoreError::NoSelection {
                                level: "dataseries".to_string(),
                            })?;
                    series.epochs_mut().select(key)?;
                }
                other => {
                    return Err(CoreError::UnknownLevel {
                        level: other.to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    fn selected_project_mut(&mut self) -> CoreResult<&mut Project> {
        self.projects.selected_mut().ok_or(CoreError::NoSelection {
            level: "project".to_string(),
        })
    }

    fn selected_folder_mut(&mut self) -> CoreResult<&mut Folder> {
        self.selected_project_mut()?
            .folders_mut()
            .selected_mut()
            .ok_or(CoreError::NoSelection {
                level: "folder".to_string(),
            })
    }

    /// Expand the execute targets of every level into fully-qualified
    /// paths, in creation order at each level.
    ///
    /// For each executing folder the series level takes priority: if its
    /// dataseries container resolves to any keys, the expansion is
    /// dataseries x channel x epoch and the flat data container is skipped;
    /// otherwise each executing data record yields a path. Stale targets
    /// resolve to no keys, so a folder can legally contribute nothing.
    pub fn execute_paths(&self) -> CoreResult<Vec<ExecutePath>> {
        let mut paths = Vec::new();
        for project_key in self.projects.resolve_execute()? {
            let Some(project) = self.projects.get(&project_key) else {
                continue;
            };
            for folder_key in project.folders().resolve_execute()? {
                let Some(folder) = project.folders().get(&folder_key) else {
                    continue;
                };
                let series_keys = folder.dataseries().resolve_execute()?;
                if series_keys.is_empty() {
                    for data_key in folder.data().resolve_execute()? {
                        paths.push(ExecutePath {
                            project: project_key.clone(),
                            folder: folder_key.clone(),
                            dataseries: None,
                            channel: None,
                            epoch: None,
                            data: Some(data_key),
                        });
                    }
                    continue;
                }
                for series_key in series_keys {
                    let Some(series) = folder.dataseries().get(&series_key) else {
                        continue;
                    };
                    let channels = series.channels().resolve_execute()?;
                    let epochs = series.epochs().resolve_execute()?;
                    for channel_key in &channels {
                        for epoch_key in &epochs {
                            paths.push(ExecutePath {
                                project: project_key.clone(),
                                folder: folder_key.clone(),
                                dataseries: Some(series_key.clone()),
                                channel: Some(channel_key.clone()),
                                epoch: Some(epoch_key.clone()),
                                data: None,
                            });
                        }
                    }
                }
            }
        }
        debug!("execute_paths: {} paths", paths.len());
        Ok(paths)
    }
}
