// Tests for saxdict
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of saxstack.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn dict_invalid_argument() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("saxdict")?;
    cmd.arg("-q");
    cmd.assert()
        .failure()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("Unrecognized option:"));

    Ok(())
}

#[test]
fn dict_missing_input() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("saxdict")?;
    cmd.assert()
        .failure()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("INPUT"));

    Ok(())
}

#[test]
fn dict_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("saxdict")?;
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--stats"));

    Ok(())
}

#[test]
fn dict_input_file_does_not_exist() -> Result<(), Box<dyn std::error::Error>>
{
    let mut cmd = Command::cargo_bin("saxdict")?;
    cmd.arg("tests/data/missing.xml");
    cmd.assert()
        .failure()
        .code(exitcode::NOINPUT)
        .stderr(predicate::str::contains("tests/data/missing.xml"));

    Ok(())
}

#[test]
fn dict_prints_sorted_entries() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("saxdict")?;
    cmd.arg("tests/data/record.xml");
    cmd.assert().success().stdout(predicate::eq(
        "color\tblue\nempty\t\nname\tWidget & Co\nsize\t3\n",
    ));

    Ok(())
}

#[test]
fn dict_stats() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("saxdict")?;
    cmd.arg("--stats").arg("tests/data/record.xml");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("tokens: "))
        .stderr(predicate::str::contains("elements: 5\n"));

    Ok(())
}

#[test]
fn dict_trace() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("saxdict")?;
    cmd.arg("--trace").arg("tests/data/record.xml");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("fill_dictionary"));

    Ok(())
}

#[test]
fn dict_second_root_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("saxdict")?;
    cmd.arg("tests/data/two-roots.xml");
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("expecting a single root element"))
        .stderr(predicate::str::contains("two-roots.xml:4:1"));

    Ok(())
}
