//! Command dispatch: run store operations, then render their snapshots.

use std::io::Write;

use pagination::{Page, PageRequest};

use super::input::{read_draft, read_json, read_resume};
use super::render::{self, Output};
use super::{
    AccountCommand, ApplicationsCommand, CandidateCommand, CliError, Command, DashboardCommand,
    EmployerCommand, JobsCommand, PageArgs, UsersCommand,
};
use crate::domain::{
    AdminDashboard, ApplicationFilter, ApplicationId, ApplicationStatus, ApplicationSubmission,
    CandidateId, EmployerDashboard, Job, JobId, JobSearch, LoginCredentials, NOT_AUTHENTICATED,
    PasswordChange, Registration, RoleFilter, RoutingGate, Session, StatusFilter, UserFilter,
    UserId,
};
use crate::store::AppStore;

/// Presentation settings for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Rows per listing page.
    pub page_size: usize,
    /// Render JSON instead of text.
    pub json: bool,
}

impl ViewOptions {
    fn request(self, paging: PageArgs) -> Result<PageRequest, CliError> {
        Ok(PageRequest::new(paging.page, self.page_size)?)
    }
}

/// Run `command` against `store` and write the result to `out`.
///
/// Sign-in commands replace `session`; sign-out commands reset it.
///
/// # Errors
///
/// Returns [`CliError::Operation`] with the container's message when a
/// store operation is rejected, and the other variants for local input or
/// output failures.
pub async fn execute(
    store: &AppStore,
    session: &mut Session,
    command: Command,
    view: ViewOptions,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut output = Output::new(out, view.json);
    match command {
        Command::Register {
            name,
            email,
            password,
            role,
        } => {
            let registration = Registration::try_from_parts(&name, &email, &password, role)?;
            store.auth.register(session, &registration).await?;
            output.landing(&RoutingGate::after_authentication(session))
        }
        Command::Login { email, password } => {
            let credentials = LoginCredentials::try_from_parts(&email, &password)?;
            store.auth.login(session, &credentials).await?;
            output.landing(&RoutingGate::after_authentication(session))
        }
        Command::Logout => {
            store.auth.logout(session)?;
            output.notice("Signed out.")
        }
        Command::Whoami => match session.user() {
            Some(user) => output.show(user, render::identity),
            None => output.notice(NOT_AUTHENTICATED),
        },
        Command::Account(command) => account(store, session, command, &mut output).await,
        Command::Users(command) => users(store, session, command, view, &mut output).await,
        Command::Jobs(command) => jobs(store, session, command, view, &mut output).await,
        Command::Candidate(command) => candidate(store, session, command, view, &mut output).await,
        Command::Employer(command) => employer(store, session, command, view, &mut output).await,
        Command::Applications(command) => {
            applications(store, session, command, view, &mut output).await
        }
        Command::Dashboard(command) => dashboard(store, session, command, &mut output).await,
    }
}

async fn account(
    store: &AppStore,
    session: &mut Session,
    command: AccountCommand,
    output: &mut Output<'_>,
) -> Result<(), CliError> {
    match command {
        AccountCommand::ChangePassword {
            current,
            replacement,
        } => {
            let change = PasswordChange::try_from_parts(&current, &replacement)?;
            store.auth.change_password(session, &change).await?;
            output.notice("Password changed.")
        }
        AccountCommand::UpdateEmail { email } => {
            let email = store.auth.update_email(session, &email).await?;
            output.figure("email", "Email", email)
        }
        AccountCommand::Delete => {
            store.auth.delete_account(session).await?;
            output.notice("Account deleted.")
        }
    }
}

async fn users(
    store: &AppStore,
    session: &Session,
    command: UsersCommand,
    view: ViewOptions,
    output: &mut Output<'_>,
) -> Result<(), CliError> {
    match command {
        UsersCommand::List {
            search,
            role,
            paging,
        } => {
            let request = view.request(paging)?;
            store.auth.fetch_users(session).await?;
            let snapshot = store.auth.state().snapshot;
            let filter = UserFilter {
                search,
                role: RoleFilter::parse(&role),
            };
            let page = Page::from_vec(filter.apply(&snapshot.users), request);
            output.show(&page, render::user_page)
        }
        UsersCommand::Delete { id } => {
            store.auth.delete_user(session, UserId::new(id)).await?;
            output.notice(&format!("Deleted user #{id}."))
        }
    }
}

async fn jobs(
    store: &AppStore,
    session: &Session,
    command: JobsCommand,
    view: ViewOptions,
    output: &mut Output<'_>,
) -> Result<(), CliError> {
    match command {
        JobsCommand::List { status, paging } => {
            let request = view.request(paging)?;
            store.jobs.fetch_all_jobs().await?;
            job_listing(store, status.map_or(StatusFilter::All, StatusFilter::Only), request, output)
        }
        JobsCommand::Mine {
            employer,
            status,
            paging,
        } => {
            let request = view.request(paging)?;
            store
                .jobs
                .fetch_employer_jobs(session, employer.map(UserId::new))
                .await?;
            job_listing(store, status.map_or(StatusFilter::All, StatusFilter::Only), request, output)
        }
        JobsCommand::Search {
            title,
            location,
            paging,
        } => {
            let request = view.request(paging)?;
            store
                .jobs
                .search_jobs(session, &JobSearch { title, location })
                .await?;
            job_listing(store, StatusFilter::All, request, output)
        }
        JobsCommand::Create { file } => {
            let job = store.jobs.create_job(session, &read_draft(&file)?).await?;
            output.show(&job, render::job)
        }
        JobsCommand::Update { id, file } => {
            let job = Job::new(JobId::new(id), read_draft(&file)?);
            let job = store.jobs.update_job(session, &job).await?;
            output.show(&job, render::job)
        }
        JobsCommand::Delete { id } => {
            store.jobs.delete_job(session, JobId::new(id)).await?;
            output.notice(&format!("Deleted job #{id}."))
        }
        JobsCommand::Status { id, status } => {
            let job = store
                .jobs
                .update_employment_status(session, JobId::new(id), status)
                .await?;
            output.show(&job, render::job)
        }
        JobsCommand::Toggle { id } => {
            let id = JobId::new(id);
            store.jobs.fetch_employer_jobs(session, None).await?;
            let current = store
                .jobs
                .state()
                .snapshot
                .jobs
                .iter()
                .find(|job| job.id == id)
                .map(Job::employment_status)
                .ok_or_else(|| CliError::Missing(format!("Job #{id} is not one of your postings.")))?;
            let job = store
                .jobs
                .update_employment_status(session, id, current.toggled())
                .await?;
            output.show(&job, render::job)
        }
        JobsCommand::Active { employer } => {
            let count = store
                .jobs
                .fetch_total_active_jobs(session, employer.map(UserId::new))
                .await?;
            output.figure("totalActiveJobs", "Active jobs", count)
        }
        JobsCommand::Stats => {
            let stats = store.jobs.fetch_stats(session).await?;
            output.show(&stats, render::job_stats)
        }
    }
}

fn job_listing(
    store: &AppStore,
    filter: StatusFilter,
    request: PageRequest,
    output: &mut Output<'_>,
) -> Result<(), CliError> {
    let snapshot = store.jobs.state().snapshot;
    let page = Page::from_vec(filter.apply(&snapshot.jobs), request);
    output.show(&page, render::job_page)
}

async fn candidate(
    store: &AppStore,
    session: &Session,
    command: CandidateCommand,
    view: ViewOptions,
    output: &mut Output<'_>,
) -> Result<(), CliError> {
    let candidates = &store.candidates;
    match command {
        CandidateCommand::Create { profile, resume } => {
            let profile = read_json(&profile)?;
            let resume = read_resume(&resume)?;
            let created = candidates.create_profile(session, &profile, &resume).await?;
            output.show(&created, render::candidate)
        }
        CandidateCommand::Show => {
            let found = candidates.fetch_profile(session).await?;
            output.show(&found, render::candidate)
        }
        CandidateCommand::Update { profile } => {
            let updated = candidates
                .update_profile(session, &read_json(&profile)?)
                .await?;
            output.show(&updated, render::candidate)
        }
        CandidateCommand::Delete { user_id } => {
            candidates.delete_profile(session, UserId::new(user_id)).await?;
            output.notice(&format!("Deleted the candidate profile of user #{user_id}."))
        }
        CandidateCommand::Resume => {
            let link = candidates.fetch_resume_link(session).await?;
            output.figure("resumeLink", "Resume", link)
        }
        CandidateCommand::List { paging } => {
            let request = view.request(paging)?;
            candidates.fetch_all(session).await?;
            let page = Page::from_vec(candidates.state().snapshot.candidates, request);
            output.show(&page, render::candidate_page)
        }
    }
}

async fn employer(
    store: &AppStore,
    session: &Session,
    command: EmployerCommand,
    view: ViewOptions,
    output: &mut Output<'_>,
) -> Result<(), CliError> {
    let employers = &store.employers;
    match command {
        EmployerCommand::Create { profile } => {
            let created = employers
                .create_profile(session, &read_json(&profile)?)
                .await?;
            output.show(&created, render::employer)
        }
        EmployerCommand::Show => {
            let found = employers.fetch_profile(session).await?;
            output.show(&found, render::employer)
        }
        EmployerCommand::Update { profile } => {
            let updated = employers
                .update_profile(session, &read_json(&profile)?)
                .await?;
            output.show(&updated, render::employer)
        }
        EmployerCommand::Delete { user_id } => {
            employers.delete_profile(session, UserId::new(user_id)).await?;
            output.notice(&format!("Deleted the employer profile of user #{user_id}."))
        }
        EmployerCommand::List { paging } => {
            let request = view.request(paging)?;
            employers.fetch_all(session).await?;
            let page = Page::from_vec(employers.state().snapshot.employers, request);
            output.show(&page, render::employer_page)
        }
    }
}

async fn applications(
    store: &AppStore,
    session: &Session,
    command: ApplicationsCommand,
    view: ViewOptions,
    output: &mut Output<'_>,
) -> Result<(), CliError> {
    let applications = &store.applications;
    match command {
        ApplicationsCommand::Apply {
            job_id,
            candidate,
            resume,
        } => {
            let submission = ApplicationSubmission {
                job_id: JobId::new(job_id),
                candidate_id: CandidateId::new(candidate),
                status: ApplicationStatus::Pending,
                resume: read_resume(&resume)?,
            };
            let submitted = applications.apply(session, &submission).await?;
            output.show(&submitted, render::application)
        }
        ApplicationsCommand::Received {
            employer,
            job_title,
            status,
            paging,
        } => {
            let request = view.request(paging)?;
            applications
                .fetch_employer_applications(session, employer.map(UserId::new))
                .await?;
            let filter = ApplicationFilter { job_title, status };
            let groups = filter.apply(&applications.state().snapshot.job_applications);
            output.show(&Page::from_vec(groups, request), render::group_page)
        }
        ApplicationsCommand::Mine { candidate, paging } => {
            let request = view.request(paging)?;
            applications
                .fetch_applied_jobs(session, CandidateId::new(candidate))
                .await?;
            let page = Page::from_vec(applications.state().snapshot.applied_jobs, request);
            output.show(&page, render::application_page)
        }
        ApplicationsCommand::Status { id, status } => {
            let updated = applications
                .update_status(session, ApplicationId::new(id), status)
                .await?;
            output.show(&updated, render::application)
        }
        ApplicationsCommand::Total => {
            let total = applications.fetch_total(session).await?;
            output.figure("totalApplications", "Total applications", total)
        }
    }
}

async fn dashboard(
    store: &AppStore,
    session: &Session,
    command: DashboardCommand,
    output: &mut Output<'_>,
) -> Result<(), CliError> {
    match command {
        DashboardCommand::Employer { employer } => {
            let owner = employer.map(UserId::new);
            let (jobs, groups) = tokio::join!(
                store.jobs.fetch_employer_jobs(session, owner),
                store.applications.fetch_employer_applications(session, owner),
            );
            jobs?;
            groups?;
            let figures = EmployerDashboard::compose(
                &store.jobs.state().snapshot.jobs,
                &store.applications.state().snapshot.job_applications,
            );
            output.show(&figures, render::employer_dashboard)
        }
        DashboardCommand::Admin => {
            let (candidates, employers, total, stats) = tokio::join!(
                store.candidates.fetch_all(session),
                store.employers.fetch_all(session),
                store.applications.fetch_total(session),
                store.jobs.fetch_stats(session),
            );
            let figures = AdminDashboard::compose(candidates?, employers?, total?, stats?);
            output.show(&figures, render::admin_dashboard)
        }
    }
}
