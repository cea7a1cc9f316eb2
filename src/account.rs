use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Instructor,
    Student,
}

impl Role {
    /// Credential tables are consulted in this order; the first match wins.
    pub const LOGIN_ORDER: [Role; 3] = [Role::Admin, Role::Instructor, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Instructor => "instructor",
            Role::Student => "student",
        }
    }

    pub fn table(&self) -> &'static str {
        self.as_str()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Instructor => "Instructor",
            Role::Student => "Student",
        }
    }

    pub fn welcome(&self) -> &'static str {
        match self {
            Role::Admin => "Welcome, Admin!",
            Role::Instructor => "Welcome, Instructor!",
            Role::Student => "Welcome, Student!",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered CRNs an instructor teaches or a student is enrolled in.
///
/// Lives only for the session; a CRN is never held twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    crns: Vec<String>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, crn: &str) -> bool {
        self.crns.iter().any(|c| c == crn)
    }

    /// Appends `crn` unless it is already scheduled.
    pub fn add(&mut self, crn: &str) -> bool {
        if self.contains(crn) {
            return false;
        }
        self.crns.push(crn.to_string());
        true
    }

    /// Removes one occurrence of `crn`; absent CRNs are a no-op.
    pub fn drop_course(&mut self, crn: &str) -> bool {
        match self.crns.iter().position(|c| c == crn) {
            Some(i) => {
                self.crns.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.crns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.crns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Schedule {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut schedule = Schedule::new();
        for crn in iter {
            let crn: String = crn.into();
            schedule.add(&crn);
        }
        schedule
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub email: String,
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub profile: Profile,
    pub title: String,
    pub office: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructor {
    pub profile: Profile,
    pub title: String,
    pub year: String,
    pub department: String,
    pub schedule: Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub profile: Profile,
    pub year: String,
    pub major: String,
    pub schedule: Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    Admin(Admin),
    Instructor(Instructor),
    Student(Student),
}

impl Account {
    pub fn role(&self) -> Role {
        match self {
            Account::Admin(_) => Role::Admin,
            Account::Instructor(_) => Role::Instructor,
            Account::Student(_) => Role::Student,
        }
    }

    pub fn profile(&self) -> &Profile {
        match self {
            Account::Admin(a) => &a.profile,
            Account::Instructor(i) => &i.profile,
            Account::Student(s) => &s.profile,
        }
    }

    pub fn email(&self) -> &str {
        &self.profile().email
    }

    pub fn full_name(&self) -> String {
        let p = self.profile();
        format!("{} {}", p.first_name, p.last_name)
    }

    /// Admins own the catalog and carry no schedule.
    pub fn schedule(&self) -> Option<&Schedule> {
        match self {
            Account::Admin(_) => None,
            Account::Instructor(i) => Some(&i.schedule),
            Account::Student(s) => Some(&s.schedule),
        }
    }

    pub fn schedule_mut(&mut self) -> Option<&mut Schedule> {
        match self {
            Account::Admin(_) => None,
            Account::Instructor(i) => Some(&mut i.schedule),
            Account::Student(s) => Some(&mut s.schedule),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.profile();
        write!(
            f,
            "{}: {} {} (ID {}, {})",
            self.role().title(),
            p.first_name,
            p.last_name,
            p.id,
            p.email
        )?;
        match self {
            Account::Admin(a) => write!(f, ", {}, office {}", a.title, a.office),
            Account::Instructor(i) => write!(
                f,
                ", {}, {} department, since {}",
                i.title, i.department, i.year
            ),
            Account::Student(s) => write!(f, ", {} major, class of {}", s.major, s.year),
        }
    }
}
