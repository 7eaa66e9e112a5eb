use async_graphql::{Context, ErrorExtensions, ID, InputObject, Object, SimpleObject};
use chrono::{DateTime, Utc};
use products_hr::{
    Department, DepartmentAverage, DepartmentFilter, Employee, EvaluationDesk, HrError, Rating,
    RankedEmployee, RosterFilter,
    rating::{filled_stars, format_score},
};
use tracing::instrument;

use super::{api_error, shared_desk};

#[derive(Default)]
pub struct HrQuery;

#[derive(Default)]
pub struct HrMutation;

#[derive(InputObject, Default, Clone)]
pub struct EmployeeFilter {
    /// Case-insensitive match on name or identifier.
    pub search: Option<String>,
    /// Department name, or `All`.
    pub department: Option<String>,
}

impl From<EmployeeFilter> for RosterFilter {
    fn from(value: EmployeeFilter) -> Self {
        RosterFilter {
            search: value.search,
            department: value
                .department
                .as_deref()
                .map(DepartmentFilter::parse)
                .unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "CriterionScore")]
pub struct CriterionScoreNode {
    pub criterion: String,
    /// Null while the criterion is unrated.
    pub rating: Option<i32>,
}

fn scores(criteria: &[&str], lookup: impl Fn(&str) -> Option<Rating>) -> Vec<CriterionScoreNode> {
    criteria
        .iter()
        .map(|criterion| CriterionScoreNode {
            criterion: criterion.to_string(),
            rating: lookup(*criterion).map(|r| i32::from(r.get())),
        })
        .collect()
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Employee")]
pub struct EmployeeNode {
    pub id: ID,
    pub name: String,
    pub department: String,
    pub position: String,
    pub notes: String,
    pub rating: f64,
    #[graphql(name = "ratingLabel")]
    pub rating_label: String,
    pub stars: i32,
    pub rated: bool,
    #[graphql(name = "actionLabel")]
    pub action_label: String,
    #[graphql(name = "evaluatedAt")]
    pub evaluated_at: Option<DateTime<Utc>>,
    #[graphql(name = "criteriaRatings")]
    pub criteria_ratings: Vec<CriterionScoreNode>,
}

impl From<&Employee> for EmployeeNode {
    fn from(employee: &Employee) -> Self {
        let ratings = employee.criteria_ratings();
        Self {
            id: ID::from(employee.id.clone()),
            name: employee.name.clone(),
            department: employee.department.to_string(),
            position: employee.position.clone(),
            notes: employee.notes().to_string(),
            rating: employee.rating(),
            rating_label: format_score(employee.is_rated().then(|| employee.rating())),
            stars: i32::from(filled_stars(employee.rating())),
            rated: employee.is_rated(),
            action_label: employee.action_label().to_string(),
            evaluated_at: employee.evaluated_at(),
            criteria_ratings: scores(employee.criteria(), |c| ratings.get(c)),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "RankedEmployee")]
pub struct RankedEmployeeNode {
    pub rank: i32,
    pub stars: i32,
    pub employee: EmployeeNode,
}

impl From<&RankedEmployee> for RankedEmployeeNode {
    fn from(ranked: &RankedEmployee) -> Self {
        Self {
            rank: ranked.rank as i32,
            stars: i32::from(ranked.stars()),
            employee: EmployeeNode::from(&ranked.employee),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "DepartmentAverage")]
pub struct DepartmentAverageNode {
    pub department: String,
    pub headcount: i32,
    pub rated: i32,
    /// Null when nobody in the department is rated yet.
    pub average: Option<f64>,
    pub label: String,
    pub stars: i32,
}

impl From<&DepartmentAverage> for DepartmentAverageNode {
    fn from(tile: &DepartmentAverage) -> Self {
        Self {
            department: tile.department.to_string(),
            headcount: tile.headcount as i32,
            rated: tile.rated as i32,
            average: tile.mean,
            label: tile.label(),
            stars: i32::from(tile.stars()),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "EvaluationSummary")]
pub struct SummaryNode {
    #[graphql(name = "topPerformers")]
    pub top_performers: Vec<RankedEmployeeNode>,
    #[graphql(name = "departmentAverages")]
    pub department_averages: Vec<DepartmentAverageNode>,
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Department")]
pub struct DepartmentNode {
    pub name: String,
    pub criteria: Vec<String>,
    pub headcount: i32,
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "EvaluationEditor")]
pub struct EditorNode {
    pub open: bool,
    #[graphql(name = "employeeId")]
    pub employee_id: Option<ID>,
    #[graphql(name = "employeeName")]
    pub employee_name: Option<String>,
    pub criteria: Vec<CriterionScoreNode>,
    pub notes: String,
    pub average: f64,
    #[graphql(name = "averageLabel")]
    pub average_label: String,
    pub stars: i32,
    pub complete: bool,
    pub missing: Vec<String>,
}

impl From<&EvaluationDesk> for EditorNode {
    fn from(desk: &EvaluationDesk) -> Self {
        let Some(draft) = desk.editor().draft() else {
            return Self {
                open: false,
                employee_id: None,
                employee_name: None,
                criteria: Vec::new(),
                notes: String::new(),
                average: 0.0,
                average_label: format_score(None),
                stars: 0,
                complete: false,
                missing: Vec::new(),
            };
        };
        let average = draft.average();
        Self {
            open: true,
            employee_id: Some(ID::from(draft.employee_id().to_string())),
            employee_name: desk
                .roster()
                .get(draft.employee_id())
                .map(|employee| employee.name.clone()),
            criteria: scores(draft.criteria(), |c| draft.ratings().get(c)),
            notes: draft.notes().to_string(),
            average,
            average_label: format_score((average > 0.0).then_some(average)),
            stars: i32::from(filled_stars(average)),
            complete: draft.is_complete(),
            missing: draft.missing(),
        }
    }
}

fn reject(err: HrError) -> async_graphql::Error {
    api_error(err).extend()
}

#[Object]
impl HrQuery {
    #[instrument(name = "graphql.hr.departments", skip_all)]
    async fn departments(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<DepartmentNode>> {
        let desk = shared_desk(ctx)?;
        let desk = desk.lock().await;
        Ok(Department::KNOWN
            .iter()
            .map(|department| DepartmentNode {
                name: department.to_string(),
                criteria: department.criteria().iter().map(|c| c.to_string()).collect(),
                headcount: desk.roster().headcount(department) as i32,
            })
            .collect())
    }

    /// Criterion names for a department; unknown departments have none.
    #[instrument(name = "graphql.hr.criteria", skip_all)]
    async fn criteria(&self, department: String) -> Vec<String> {
        products_hr::criteria_for(&department)
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[instrument(name = "graphql.hr.employees", skip_all)]
    async fn employees(
        &self,
        ctx: &Context<'_>,
        filter: Option<EmployeeFilter>,
    ) -> async_graphql::Result<Vec<EmployeeNode>> {
        let roster_filter = RosterFilter::from(filter.unwrap_or_default());
        let desk = shared_desk(ctx)?;
        let desk = desk.lock().await;
        Ok(desk.filter(&roster_filter).map(EmployeeNode::from).collect())
    }

    #[instrument(name = "graphql.hr.employee", skip_all)]
    async fn employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<EmployeeNode>> {
        let desk = shared_desk(ctx)?;
        let desk = desk.lock().await;
        Ok(desk.roster().get(id.as_str()).map(EmployeeNode::from))
    }

    #[instrument(name = "graphql.hr.summary", skip_all)]
    async fn summary(&self, ctx: &Context<'_>) -> async_graphql::Result<SummaryNode> {
        let desk = shared_desk(ctx)?;
        let aggregates = desk.lock().await.aggregates();
        Ok(SummaryNode {
            top_performers: aggregates
                .top_performers
                .iter()
                .map(RankedEmployeeNode::from)
                .collect(),
            department_averages: aggregates
                .department_averages
                .iter()
                .map(DepartmentAverageNode::from)
                .collect(),
        })
    }

    #[instrument(name = "graphql.hr.editor", skip_all)]
    async fn editor(&self, ctx: &Context<'_>) -> async_graphql::Result<EditorNode> {
        let desk = shared_desk(ctx)?;
        let desk = desk.lock().await;
        Ok(EditorNode::from(&*desk))
    }
}

#[Object]
impl HrMutation {
    #[instrument(name = "graphql.hr.open_evaluation", skip_all)]
    async fn open_evaluation(
        &self,
        ctx: &Context<'_>,
        employee_id: ID,
    ) -> async_graphql::Result<EditorNode> {
        let desk = shared_desk(ctx)?;
        let mut desk = desk.lock().await;
        desk.open(employee_id.as_str()).map_err(reject)?;
        Ok(EditorNode::from(&*desk))
    }

    #[instrument(name = "graphql.hr.rate_criterion", skip_all)]
    async fn rate_criterion(
        &self,
        ctx: &Context<'_>,
        criterion: String,
        rating: i32,
    ) -> async_graphql::Result<EditorNode> {
        let rating = Rating::new(i64::from(rating)).map_err(reject)?;
        let desk = shared_desk(ctx)?;
        let mut desk = desk.lock().await;
        desk.rate(&criterion, rating).map_err(reject)?;
        Ok(EditorNode::from(&*desk))
    }

    #[instrument(name = "graphql.hr.set_evaluation_notes", skip_all)]
    async fn set_evaluation_notes(
        &self,
        ctx: &Context<'_>,
        notes: String,
    ) -> async_graphql::Result<EditorNode> {
        let desk = shared_desk(ctx)?;
        let mut desk = desk.lock().await;
        desk.set_notes(notes).map_err(reject)?;
        Ok(EditorNode::from(&*desk))
    }

    #[instrument(name = "graphql.hr.save_evaluation", skip_all)]
    async fn save_evaluation(&self, ctx: &Context<'_>) -> async_graphql::Result<EmployeeNode> {
        let desk = shared_desk(ctx)?;
        let mut desk = desk.lock().await;
        let employee = desk.save().map_err(reject)?;
        Ok(EmployeeNode::from(employee))
    }

    #[instrument(name = "graphql.hr.cancel_evaluation", skip_all)]
    async fn cancel_evaluation(&self, ctx: &Context<'_>) -> async_graphql::Result<EditorNode> {
        let desk = shared_desk(ctx)?;
        let mut desk = desk.lock().await;
        desk.cancel();
        Ok(EditorNode::from(&*desk))
    }
}
