// src/seed.rs

//! Fixed seed content: the job board listings and a starter question bank.
//!
//! Both inserts skip rows that already exist, so seeding can be re-run.

use uuid::Uuid;

use crate::{
    models::{job::NewJob, question::NewQuestion},
    store::{QuizStore, StoreError},
};

struct JobSeed {
    title: &'static str,
    company: &'static str,
    description: &'static str,
    requirements: [&'static str; 4],
    location: &'static str,
    salary: i64,
}

const JOBS: [JobSeed; 10] = [
    JobSeed {
        title: "Frontend Developer",
        company: "WebTech Solutions",
        description: "Seeking a skilled Frontend Developer to build and optimize user interfaces using modern frameworks.",
        requirements: [
            "Develop responsive UI components",
            "Optimize performance and accessibility",
            "Collaborate with backend teams",
            "Ensure cross-browser compatibility",
        ],
        location: "Austin, TX",
        salary: 95_000,
    },
    JobSeed {
        title: "Backend Developer",
        company: "Cloud Systems Inc.",
        description: "We need a Backend Developer to build scalable APIs and database solutions.",
        requirements: [
            "Design and maintain server-side applications",
            "Optimize database performance",
            "Implement authentication and security features",
            "Write efficient and scalable code",
        ],
        location: "Seattle, WA",
        salary: 110_000,
    },
    JobSeed {
        title: "Full Stack Developer",
        company: "Innovate IT",
        description: "Looking for a Full Stack Developer to work on both frontend and backend systems.",
        requirements: [
            "Develop and integrate frontend and backend systems",
            "Optimize application performance",
            "Implement best coding practices",
            "Collaborate with product and design teams",
        ],
        location: "Chicago, IL",
        salary: 115_000,
    },
    JobSeed {
        title: "DevOps Engineer",
        company: "CloudOps Solutions",
        description: "We are hiring a DevOps Engineer to streamline CI/CD pipelines and automate infrastructure.",
        requirements: [
            "Design and implement CI/CD pipelines",
            "Manage cloud infrastructure",
            "Monitor system performance",
            "Automate deployment processes",
        ],
        location: "Remote",
        salary: 125_000,
    },
    JobSeed {
        title: "UI/UX Designer",
        company: "DesignPro",
        description: "We are looking for a UI/UX Designer to create engaging user experiences.",
        requirements: [
            "Design intuitive and visually appealing interfaces",
            "Conduct user research and testing",
            "Create wireframes and prototypes",
            "Collaborate with developers for seamless implementation",
        ],
        location: "Los Angeles, CA",
        salary: 85_000,
    },
    JobSeed {
        title: "Cybersecurity Analyst",
        company: "SecureTech",
        description: "Join our security team as a Cybersecurity Analyst to protect systems and data.",
        requirements: [
            "Monitor and analyze security threats",
            "Implement security measures",
            "Conduct vulnerability assessments",
            "Ensure compliance with security protocols",
        ],
        location: "Boston, MA",
        salary: 105_000,
    },
    JobSeed {
        title: "AI/ML Engineer",
        company: "AI Innovations",
        description: "We need an AI/ML Engineer to develop machine learning models and AI solutions.",
        requirements: [
            "Develop and train machine learning models",
            "Analyze large datasets",
            "Optimize AI algorithms",
            "Work with cloud-based AI tools",
        ],
        location: "San Diego, CA",
        salary: 130_000,
    },
    JobSeed {
        title: "Cloud Architect",
        company: "CloudTech Solutions",
        description: "Looking for a Cloud Architect to design scalable cloud infrastructure solutions.",
        requirements: [
            "Design and implement cloud architecture",
            "Optimize cloud cost and performance",
            "Ensure cloud security compliance",
            "Work with cloud service providers",
        ],
        location: "Dallas, TX",
        salary: 135_000,
    },
    JobSeed {
        title: "QA Engineer",
        company: "TestPro",
        description: "We are seeking a QA Engineer to ensure the quality and reliability of our applications.",
        requirements: [
            "Develop and execute test cases",
            "Identify and report bugs",
            "Automate testing procedures",
            "Collaborate with developers for debugging",
        ],
        location: "Miami, FL",
        salary: 90_000,
    },
    JobSeed {
        title: "Database Administrator",
        company: "DataSecure Inc.",
        description: "Hiring a Database Administrator to manage and optimize our database systems.",
        requirements: [
            "Maintain and optimize databases",
            "Ensure data integrity and security",
            "Perform regular database backups",
            "Monitor database performance and troubleshoot issues",
        ],
        location: "Denver, CO",
        salary: 100_000,
    },
];

/// (level, prompt, answers, correct index)
type QuestionSeed = (i32, &'static str, [&'static str; 4], i32);

const QUESTIONS: [QuestionSeed; 10] = [
    (
        1,
        "What should a resume summary focus on?",
        [
            "Your hobbies",
            "Your most relevant skills and achievements",
            "Your salary expectations",
            "A list of every job you ever had",
        ],
        1,
    ),
    (
        1,
        "How long should a cover letter usually be?",
        ["One page or less", "Three pages", "As long as your resume", "A single sentence"],
        0,
    ),
    (
        1,
        "What is the best way to prepare for a behavioral interview?",
        [
            "Memorize the job description",
            "Prepare stories using the STAR method",
            "Avoid giving examples",
            "Ask about vacation on the first call",
        ],
        1,
    ),
    (
        1,
        "When is it appropriate to follow up after an interview?",
        [
            "Never",
            "Within a day or two with a thank-you note",
            "Every hour until you hear back",
            "Only after six months",
        ],
        1,
    ),
    (
        1,
        "Which of these belongs in a professional email address?",
        ["A nickname and emoji", "Your first and last name", "Your birth year only", "Your favorite band"],
        1,
    ),
    (
        2,
        "What does an applicant tracking system (ATS) do?",
        [
            "Schedules company holidays",
            "Screens and ranks applications by keywords",
            "Pays employee salaries",
            "Books meeting rooms",
        ],
        1,
    ),
    (
        2,
        "What is the purpose of a salary range in a job posting?",
        [
            "To set expectations for compensation",
            "To list the company's revenue",
            "To show bonus history",
            "To rank applicants",
        ],
        0,
    ),
    (
        2,
        "Which question is good to ask an interviewer?",
        [
            "Can I work from the beach every day?",
            "What does success look like in the first 90 days?",
            "How little can I work?",
            "Did I get the job?",
        ],
        1,
    ),
    (
        2,
        "How should you tailor a resume for a specific role?",
        [
            "Send the same resume everywhere",
            "Mirror the skills the posting asks for",
            "Remove all dates",
            "Add a photo of your pet",
        ],
        1,
    ),
    (
        2,
        "What is a portfolio most useful for?",
        [
            "Showing concrete examples of your work",
            "Listing references' phone numbers",
            "Storing tax documents",
            "Replacing the interview",
        ],
        0,
    ),
];

/// The ten job postings, all owned by `posted_by`.
pub fn job_seed_data(posted_by: Uuid) -> Vec<NewJob> {
    JOBS.iter()
        .map(|job| NewJob {
            title: job.title.to_string(),
            company: job.company.to_string(),
            description: job.description.to_string(),
            requirements: job.requirements.iter().map(|r| r.to_string()).collect(),
            location: job.location.to_string(),
            salary: job.salary,
            posted_by_id: posted_by,
        })
        .collect()
}

pub fn question_seed_data() -> Vec<NewQuestion> {
    QUESTIONS
        .iter()
        .map(|(level, prompt, answers, correct_index)| NewQuestion {
            level: *level,
            prompt: prompt.to_string(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
            correct_index: *correct_index,
        })
        .collect()
}

/// Inserts the job postings in one batch; returns how many were new.
pub async fn seed_jobs(store: &dyn QuizStore, posted_by: Uuid) -> Result<u64, StoreError> {
    let inserted = store.insert_jobs(&job_seed_data(posted_by)).await?;
    tracing::info!(inserted, "Job seed data inserted");
    Ok(inserted)
}

pub async fn seed_questions(store: &dyn QuizStore) -> Result<u64, StoreError> {
    let inserted = store.insert_questions(&question_seed_data()).await?;
    tracing::info!(inserted, "Question seed data inserted");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn ten_jobs_with_four_requirements_each() {
        let owner = Uuid::new_v4();
        let jobs = job_seed_data(owner);

        assert_eq!(jobs.len(), 10);
        assert!(jobs.iter().all(|j| j.requirements.len() == 4));
        assert!(jobs.iter().all(|j| j.salary > 0 && j.posted_by_id == owner));
        assert_eq!(jobs[0].title, "Frontend Developer");
        assert_eq!(jobs[9].salary, 100_000);
    }

    #[test]
    fn seeded_questions_have_valid_answers() {
        for q in question_seed_data() {
            let correct = usize::try_from(q.correct_index).unwrap();
            assert!(correct < q.answers.len(), "{}", q.prompt);
        }
    }

    #[tokio::test]
    async fn reseeding_does_not_duplicate() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        assert_eq!(seed_jobs(&store, owner).await.unwrap(), 10);
        assert_eq!(seed_jobs(&store, owner).await.unwrap(), 0);
        assert_eq!(store.list_jobs().await.unwrap().len(), 10);

        assert_eq!(seed_questions(&store).await.unwrap(), 10);
        assert_eq!(seed_questions(&store).await.unwrap(), 0);
        assert_eq!(store.questions_for_level(2).await.unwrap().len(), 5);
    }
}
