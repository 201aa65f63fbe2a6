//! Text and JSON rendering of snapshots.

use std::io::{self, Write};

use pagination::Page;
use serde::Serialize;
use serde_json::json;

use super::CliError;
use crate::domain::{
    AdminDashboard, Candidate, Employer, EmployerDashboard, GateOutcome, Job, JobApplication,
    JobApplicationGroup, JobStats, SessionUser, UserListItem,
};

/// Where a command writes its result.
pub(super) struct Output<'w> {
    out: &'w mut dyn Write,
    json: bool,
}

impl<'w> Output<'w> {
    pub(super) fn new(out: &'w mut dyn Write, json: bool) -> Self {
        Self { out, json }
    }

    /// Render `value` as pretty JSON, or with `text` otherwise.
    pub(super) fn show<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
        text: impl FnOnce(&mut dyn Write, &T) -> io::Result<()>,
    ) -> Result<(), CliError> {
        if self.json {
            serde_json::to_writer_pretty(&mut *self.out, value).map_err(io::Error::from)?;
            writeln!(self.out)?;
        } else {
            text(&mut *self.out, value)?;
        }
        Ok(())
    }

    /// One confirmation line.
    pub(super) fn notice(&mut self, message: &str) -> Result<(), CliError> {
        self.show(&json!({ "message": message }), |out, _| writeln!(out, "{message}"))
    }

    /// A single labelled value, keyed by `key` in JSON.
    pub(super) fn figure(
        &mut self,
        key: &str,
        label: &str,
        value: impl Serialize + std::fmt::Display,
    ) -> Result<(), CliError> {
        self.show(&json!({ key: &value }), |out, _| writeln!(out, "{label}: {value}"))
    }

    /// Where the gate sends a freshly authenticated user.
    pub(super) fn landing(&mut self, outcome: &GateOutcome) -> Result<(), CliError> {
        #[derive(Serialize)]
        struct Landing<'a> {
            path: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            notice: Option<&'a str>,
        }

        let landing = Landing {
            path: outcome.path(),
            notice: outcome.notice(),
        };
        self.show(&landing, |out, landing| {
            writeln!(out, "Landing page: {}", landing.path)?;
            if let Some(notice) = landing.notice {
                writeln!(out, "{notice}")?;
            }
            Ok(())
        })
    }
}

fn pager<T>(
    out: &mut dyn Write,
    page: &Page<T>,
    empty: &str,
    mut row: impl FnMut(&mut dyn Write, &T) -> io::Result<()>,
) -> io::Result<()> {
    if page.items().is_empty() {
        writeln!(out, "{empty}")?;
    }
    for item in page.items() {
        row(&mut *out, item)?;
    }
    writeln!(
        out,
        "page {} of {} ({} total)",
        page.page(),
        page.total_pages(),
        page.total_items()
    )
}

fn job_row(out: &mut dyn Write, job: &Job) -> io::Result<()> {
    writeln!(
        out,
        "#{:<5} {:<32} {:<24} {:<20} {}",
        job.id.get(),
        job.title(),
        job.draft.company_name,
        job.draft.location,
        job.employment_status()
    )
}

pub(super) fn job_page(out: &mut dyn Write, page: &Page<&Job>) -> io::Result<()> {
    pager(out, page, "No jobs found.", |out, job| job_row(out, job))
}

pub(super) fn job(out: &mut dyn Write, job: &Job) -> io::Result<()> {
    let draft = &job.draft;
    writeln!(out, "#{} {}", job.id, draft.title)?;
    writeln!(out, "  company:   {}", draft.company_name)?;
    writeln!(out, "  location:  {}", draft.location)?;
    writeln!(out, "  salary:    {}", draft.salary_range)?;
    writeln!(out, "  type:      {}", draft.job_type)?;
    writeln!(out, "  status:    {}", draft.employment_status)?;
    writeln!(out, "  skills:    {}", draft.skills_required)?;
    writeln!(out, "  deadline:  {}", draft.application_deadline)?;
    writeln!(out, "  {}", draft.description)
}

pub(super) fn job_stats(out: &mut dyn Write, stats: &JobStats) -> io::Result<()> {
    writeln!(out, "Total jobs:  {}", stats.total_jobs)?;
    writeln!(out, "Active jobs: {}", stats.active_jobs)
}

pub(super) fn user_page(out: &mut dyn Write, page: &Page<&UserListItem>) -> io::Result<()> {
    pager(out, page, "No users found.", |out, user| {
        writeln!(
            out,
            "#{:<5} {:<24} {:<32} {:<10} joined {}",
            user.id.get(),
            user.name,
            user.email,
            user.role,
            user.joined_on()
        )
    })
}

pub(super) fn identity(out: &mut dyn Write, user: &SessionUser) -> io::Result<()> {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_owned());
    writeln!(out, "name:  {}", field(&user.name))?;
    writeln!(out, "email: {}", field(&user.email))?;
    writeln!(out, "role:  {}", field(&user.role))
}

pub(super) fn candidate(out: &mut dyn Write, candidate: &Candidate) -> io::Result<()> {
    let profile = &candidate.profile;
    writeln!(out, "#{} {}", candidate.id, profile.fullname)?;
    for (label, value) in profile.form_fields().into_iter().skip(1) {
        if !value.is_empty() {
            writeln!(out, "  {label}: {value}")?;
        }
    }
    if !candidate.resume_link.is_empty() {
        writeln!(out, "  resume: {}", candidate.resume_link)?;
    }
    Ok(())
}

pub(super) fn candidate_page(out: &mut dyn Write, page: &Page<Candidate>) -> io::Result<()> {
    pager(out, page, "No candidates found.", |out, candidate| {
        writeln!(
            out,
            "#{:<5} {:<24} {:<32} {}",
            candidate.id.get(),
            candidate.profile.fullname,
            candidate.profile.email,
            candidate.profile.skill
        )
    })
}

pub(super) fn employer(out: &mut dyn Write, employer: &Employer) -> io::Result<()> {
    let profile = &employer.profile;
    writeln!(out, "{} (account #{})", profile.company_name, employer.user_id)?;
    writeln!(out, "  industry: {}", profile.industry_type)?;
    writeln!(out, "  email:    {}", profile.email)?;
    writeln!(out, "  phone:    {}", profile.contact_number)?;
    writeln!(out, "  address:  {}", profile.address)?;
    if !profile.website.is_empty() {
        writeln!(out, "  website:  {}", profile.website)?;
    }
    if !profile.company_description.is_empty() {
        writeln!(out, "  {}", profile.company_description)?;
    }
    Ok(())
}

pub(super) fn employer_page(out: &mut dyn Write, page: &Page<Employer>) -> io::Result<()> {
    pager(out, page, "No employers found.", |out, employer| {
        writeln!(
            out,
            "#{:<5} {:<32} {:<20} {}",
            employer.user_id.get(),
            employer.profile.company_name,
            employer.profile.industry_type,
            employer.profile.email
        )
    })
}

pub(super) fn application(out: &mut dyn Write, application: &JobApplication) -> io::Result<()> {
    writeln!(
        out,
        "#{:<5} {:<32} {:<24} {}",
        application.id.get(),
        application.job.title(),
        application.job.draft.company_name,
        application.status
    )
}

pub(super) fn application_page(out: &mut dyn Write, page: &Page<JobApplication>) -> io::Result<()> {
    pager(out, page, "No applications found.", |out, item| application(out, item))
}

pub(super) fn group_page(out: &mut dyn Write, page: &Page<JobApplicationGroup>) -> io::Result<()> {
    pager(out, page, "No applications found.", |out, group| {
        writeln!(
            out,
            "{} (job #{}): {} application(s)",
            group.job_title, group.job_id, group.applications_count
        )?;
        for application in &group.applications {
            writeln!(
                out,
                "  #{:<5} {:<24} {:<12} {}",
                application.id.get(),
                application.candidate.profile.fullname,
                application.status.as_str(),
                application.resume
            )?;
        }
        Ok(())
    })
}

pub(super) fn employer_dashboard(out: &mut dyn Write, figures: &EmployerDashboard) -> io::Result<()> {
    writeln!(out, "Total jobs:         {}", figures.total_jobs)?;
    writeln!(out, "Active jobs:        {}", figures.active_jobs)?;
    writeln!(out, "Total applications: {}", figures.total_applications)
}

pub(super) fn admin_dashboard(out: &mut dyn Write, figures: &AdminDashboard) -> io::Result<()> {
    writeln!(out, "Candidates:         {}", figures.candidates)?;
    writeln!(out, "Employers:          {}", figures.employers)?;
    writeln!(out, "Total jobs:         {}", figures.total_jobs)?;
    writeln!(out, "Active jobs:        {}", figures.active_jobs)?;
    writeln!(out, "Total applications: {}", figures.total_applications)
}
