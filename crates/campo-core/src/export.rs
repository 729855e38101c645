//! Markdown export of recommendations into a notes vault.
//!
//! Layout under the vault root:
//! - `00-DASHBOARDS/Current-Recommendation.md`, overwritten each time
//! - `01-DAILY/<YYYY-MM-DD>-Recommendation.md`, one per day

use indoc::formatdoc;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::circadian::BinaryRecommendation;
use crate::error::Result;
use crate::recommend::RecommendationResult;

const DASHBOARDS_DIR: &str = "00-DASHBOARDS";
const DAILY_DIR: &str = "01-DAILY";

/// Files written by [`MarkdownExporter::export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub dashboard: PathBuf,
    pub daily: PathBuf,
}

pub struct MarkdownExporter {
    vault_dir: PathBuf,
}

impl MarkdownExporter {
    pub fn new(vault_dir: impl Into<PathBuf>) -> Self {
        Self {
            vault_dir: vault_dir.into(),
        }
    }

    pub fn vault_dir(&self) -> &Path {
        &self.vault_dir
    }

    /// Write the dashboard and the daily note.
    ///
    /// # Errors
    /// Returns an error if a directory or file cannot be written.
    pub fn export(
        &self,
        result: &RecommendationResult,
        binary: &BinaryRecommendation,
    ) -> Result<ExportPaths> {
        let dashboards = self.vault_dir.join(DASHBOARDS_DIR);
        let daily_dir = self.vault_dir.join(DAILY_DIR);
        std::fs::create_dir_all(&dashboards)?;
        std::fs::create_dir_all(&daily_dir)?;

        let dashboard = dashboards.join("Current-Recommendation.md");
        std::fs::write(&dashboard, render_dashboard(result, binary))?;

        let date = result.generated_at.format("%Y-%m-%d");
        let daily = daily_dir.join(format!("{date}-Recommendation.md"));
        std::fs::write(&daily, render_daily(result, binary))?;

        info!(dashboard = %dashboard.display(), daily = %daily.display(), "exported recommendation");
        Ok(ExportPaths { dashboard, daily })
    }
}

fn task_lines(result: &RecommendationResult) -> String {
    if result.tasks.is_empty() {
        return "_Sin tareas compatibles con tu energía actual._\n".to_string();
    }
    result
        .tasks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let marker = if t.non_negotiable { " (no negociable)" } else { "" };
            let hour = t
                .ideal_time
                .map(|it| format!(" · {:02}:{:02}", it.hour, it.minute))
                .unwrap_or_default();
            format!(
                "{}. **{}**{} · prioridad {} · energía {}/10{}\n",
                i + 1,
                t.name,
                marker,
                t.priority,
                t.energy_required,
                hour
            )
        })
        .collect()
}

fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

/// Dashboard note content.
pub fn render_dashboard(result: &RecommendationResult, binary: &BinaryRecommendation) -> String {
    let timestamp = result.generated_at.format("%Y-%m-%d %H:%M");
    let choice = binary.chosen();
    formatdoc! {"
        # Recomendación Actual - Campo Sagrado

        > **Última actualización:** {timestamp}
        > **Fase Circadiana:** {phase}
        > **Tu Energía:** {energy}
        > **Ventana Óptima:** {window}

        ---

        ## Tareas Recomendadas

        {tasks}
        **Confianza:** {confidence}
        **Alineación energética:** {alignment}

        {reasoning}

        ---

        ## Opción del Momento

        **[{option:?}] {action}** ({duration} min): {description}

        ---
        *Generado por Campo Sagrado*
        ",
        timestamp = timestamp,
        phase = binary.phase.label(),
        energy = result.energy,
        window = result.optimal_time,
        tasks = task_lines(result),
        confidence = percent(result.confidence),
        alignment = percent(result.energy_alignment),
        reasoning = result.reasoning,
        option = binary.recommended,
        action = choice.action,
        duration = choice.duration_min,
        description = choice.description,
    }
}

/// Daily note content.
pub fn render_daily(result: &RecommendationResult, binary: &BinaryRecommendation) -> String {
    let date = result.generated_at.format("%Y-%m-%d");
    let time = result.generated_at.format("%H:%M");
    formatdoc! {"
        # Recomendación del {date}

        > **Hora:** {time}
        > **Fase Circadiana:** {phase}
        > **Tu Energía:** {energy}

        ---

        ## Tareas

        {tasks}
        **Confianza:** {confidence}

        ---

        ## Opciones Evaluadas

        - **A:** {a_action} ({a_duration} min), alineación {a_alignment}
        - **B:** {b_action} ({b_duration} min), alineación {b_alignment}

        ---

        ## Reflexiones

        > Espacio para notas personales...

        - [[{dashboards}/Current-Recommendation]]
        ",
        date = date,
        time = time,
        phase = binary.phase.label(),
        energy = result.energy,
        tasks = task_lines(result),
        confidence = percent(result.confidence),
        a_action = binary.option_a.action,
        a_duration = binary.option_a.duration_min,
        a_alignment = percent(binary.option_a.alignment_score),
        b_action = binary.option_b.action,
        b_duration = binary.option_b.duration_min,
        b_alignment = percent(binary.option_b.alignment_score),
        dashboards = DASHBOARDS_DIR,
    }
}
