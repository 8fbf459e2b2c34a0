use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::generation_service::GenerationService;
use crate::models::{
    ActionPlan, ActionPlanTask, AssessmentAnswer, CreateActionPlan, CreateAssessmentResponse,
    CreateRecommendation, CreateWellnessScore, Recommendation, RecommendationSummary,
    WellnessAnalysis, WellnessScore,
};
use crate::storage::Storage;

/// Fixed score set substituted when the analysis call fails. These are the
/// constants the original product showed users on the fallback path.
fn fallback_scores() -> WellnessAnalysis {
    WellnessAnalysis {
        physical: 75,
        mental: 68,
        sleep: 60,
        stress: 65,
        nutrition: 72,
        overall_score: 70,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// The step's data came from the generation service.
    Generated,
    /// Generation failed; fixed default data was substituted.
    Fallback,
    /// A predecessor failed, so this step never ran.
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome<T> {
    pub status: StepStatus,
    pub data: T,
}

/// The per-step result of one orchestrated assessment run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentOutcome {
    pub scores: StepOutcome<WellnessScore>,
    pub recommendations: StepOutcome<Vec<Recommendation>>,
    pub action_plan: StepOutcome<Vec<ActionPlan>>,
}

/// Server-side orchestration of the assessment chain: persist answers,
/// analyze scores, generate recommendations, generate the action plan.
///
/// Unlike the per-endpoint flow, failure handling happens here: a failed
/// analysis substitutes the fixed fallback scores, and every failure edge
/// leads directly to completion with the remaining steps skipped. Repeated
/// submissions carrying the same idempotency key return the first outcome
/// without re-invoking generation.
pub struct AssessmentPipelineService {
    store: Arc<dyn Storage>,
    generation: Arc<GenerationService>,
    completed: RwLock<HashMap<String, AssessmentOutcome>>,
}

impl AssessmentPipelineService {
    pub fn new(store: Arc<dyn Storage>, generation: Arc<GenerationService>) -> Self {
        Self {
            store,
            generation,
            completed: RwLock::new(HashMap::new()),
        }
    }

    pub async fn complete_assessment(
        &self,
        user_id: i32,
        answers: &[AssessmentAnswer],
        week_count: i32,
        idempotency_key: Option<String>,
    ) -> Result<AssessmentOutcome> {
        if let Some(key) = &idempotency_key {
            if let Some(outcome) = self.completed.read().await.get(key) {
                info!(%key, "Returning previously completed assessment outcome");
                return Ok(outcome.clone());
            }
        }

        for answer in answers {
            self.store
                .create_assessment_response(CreateAssessmentResponse {
                    user_id,
                    question_id: answer.question_id.clone(),
                    response: answer.response.clone(),
                })
                .await?;
        }

        let outcome = self.run_generation_chain(user_id, answers, week_count).await?;

        if let Some(key) = idempotency_key {
            self.completed.write().await.insert(key, outcome.clone());
        }
        Ok(outcome)
    }

    async fn run_generation_chain(
        &self,
        user_id: i32,
        answers: &[AssessmentAnswer],
        week_count: i32,
    ) -> Result<AssessmentOutcome> {
        let (analysis, scores_status) = match self.generation.analyze_wellness_scores(answers).await
        {
            Ok(analysis) => (analysis, StepStatus::Generated),
            Err(error) => {
                warn!(%error, "Wellness analysis failed, substituting fallback scores");
                (fallback_scores(), StepStatus::Fallback)
            }
        };

        let score = self
            .store
            .create_wellness_score(CreateWellnessScore {
                user_id,
                physical: analysis.physical,
                mental: analysis.mental,
                sleep: analysis.sleep,
                stress: analysis.stress,
                nutrition: analysis.nutrition,
                overall_score: analysis.overall_score,
            })
            .await?;

        // Every failure edge leads directly to completion.
        if scores_status == StepStatus::Fallback {
            return Ok(AssessmentOutcome {
                scores: StepOutcome {
                    status: scores_status,
                    data: score,
                },
                recommendations: StepOutcome {
                    status: StepStatus::Skipped,
                    data: Vec::new(),
                },
                action_plan: StepOutcome {
                    status: StepStatus::Skipped,
                    data: Vec::new(),
                },
            });
        }

        let (recommendations, recommendations_status) = match self
            .generation
            .generate_recommendations(&analysis.scores())
            .await
        {
            Ok(generated) => {
                let mut persisted = Vec::with_capacity(generated.len());
                for rec in generated {
                    persisted.push(
                        self.store
                            .create_recommendation(CreateRecommendation {
                                user_id,
                                category: rec.category,
                                title: rec.title,
                                description: rec.description,
                                is_hsa_eligible: rec.is_hsa_eligible,
                                tag: rec.tag,
                                icon: rec.icon,
                            })
                            .await?,
                    );
                }
                (persisted, StepStatus::Generated)
            }
            Err(error) => {
                warn!(%error, "Recommendation generation failed, skipping");
                (Vec::new(), StepStatus::Skipped)
            }
        };

        let (plans, plan_status) = if recommendations_status == StepStatus::Generated {
            let summaries: Vec<RecommendationSummary> = recommendations
                .iter()
                .map(|rec| RecommendationSummary {
                    category: rec.category.clone(),
                    title: rec.title.clone(),
                    description: rec.description.clone(),
                })
                .collect();

            match self
                .generation
                .generate_action_plan(&summaries, week_count)
                .await
            {
                Ok(weeks) => {
                    let mut persisted = Vec::with_capacity(weeks.len());
                    for week in weeks {
                        persisted.push(
                            self.store
                                .create_action_plan(CreateActionPlan {
                                    user_id,
                                    week_number: week.week_number,
                                    start_date: week.start_date,
                                    end_date: week.end_date,
                                    tasks: week
                                        .tasks
                                        .into_iter()
                                        .map(|task| ActionPlanTask {
                                            description: task.description,
                                            completed: task.completed,
                                        })
                                        .collect(),
                                })
                                .await?,
                        );
                    }
                    (persisted, StepStatus::Generated)
                }
                Err(error) => {
                    warn!(%error, "Action plan generation failed, skipping");
                    (Vec::new(), StepStatus::Skipped)
                }
            }
        } else {
            (Vec::new(), StepStatus::Skipped)
        };

        Ok(AssessmentOutcome {
            scores: StepOutcome {
                status: scores_status,
                data: score,
            },
            recommendations: StepOutcome {
                status: recommendations_status,
                data: recommendations,
            },
            action_plan: StepOutcome {
                status: plan_status,
                data: plans,
            },
        })
    }
}
